//! [`Attendance`]-related REST API definitions.

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use common::{Date, DateTime};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{
        self,
        attendance::{self, Punch, PunchError},
        employee,
    },
    query, Query as _,
};

use crate::{api, define_error, AsError, Error, Service};

/// Builds the [`Router`] of [`Attendance`] endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/attendance", get(list).post(create))
        .route("/attendance/check-in", post(check_in))
        .route("/attendance/check-out", post(check_out))
        .route(
            "/attendance/:id",
            get(get_by_id).put(update).delete(delete),
        )
        .route("/attendance/employee/:employee_id", get(list_by_employee))
        .route("/attendance/date/:date", get(list_by_date))
        .route("/attendance/status/:status", get(list_by_status))
}

/// Working day of an employee.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    /// ID of this [`Attendance`].
    pub id: attendance::Id,

    /// Business number of the attending employee.
    pub employee_id: employee::Number,

    /// Date of this [`Attendance`].
    pub date: Date,

    /// Check-in of the employee.
    pub check_in: Option<Punch>,

    /// Check-out of the employee.
    pub check_out: Option<Punch>,

    /// Hours worked between the check-in and the check-out.
    pub working_hours: attendance::Hours,

    /// Part of the worked hours exceeding a standard day.
    pub overtime_hours: attendance::Hours,

    /// Status of this [`Attendance`].
    pub status: attendance::Status,

    /// Notes on this [`Attendance`].
    pub notes: Option<String>,

    /// Whether this [`Attendance`] was recorded manually.
    pub is_manual_entry: bool,

    /// [`DateTime`] when this [`Attendance`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`Attendance`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::Attendance> for Attendance {
    fn from(attendance: domain::Attendance) -> Self {
        let domain::Attendance {
            id,
            employee_id,
            date,
            check_in,
            check_out,
            working_hours,
            overtime_hours,
            status,
            notes,
            is_manual_entry,
            created_at,
            updated_at,
        } = attendance;

        Self {
            id,
            employee_id,
            date,
            check_in,
            check_out,
            working_hours,
            overtime_hours,
            status,
            notes,
            is_manual_entry,
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Manually recorded state of an [`Attendance`].
///
/// Worked hours are always calculated from the punches.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInput {
    /// Business number of the attending employee.
    pub employee_id: employee::Number,

    /// Date of the [`Attendance`].
    pub date: Date,

    /// Check-in of the employee.
    #[serde(default)]
    pub check_in: Option<Punch>,

    /// Check-out of the employee.
    #[serde(default)]
    pub check_out: Option<Punch>,

    /// Status of the [`Attendance`].
    #[serde(default)]
    pub status: attendance::Status,

    /// Notes on the [`Attendance`].
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AttendanceInput> for command::CreateAttendance {
    fn from(input: AttendanceInput) -> Self {
        let AttendanceInput {
            employee_id,
            date,
            check_in,
            check_out,
            status,
            notes,
        } = input;

        Self {
            employee_id,
            date,
            check_in,
            check_out,
            status,
            notes,
        }
    }
}

/// Employee clocking in or out.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchInput {
    /// Business number of the employee.
    pub employee_id: employee::Number,

    /// Place the employee works at.
    #[serde(default)]
    pub location: attendance::WorkLocation,
}

/// Converts [`domain::Attendance`]s into a response.
fn list_of(records: Vec<domain::Attendance>) -> Json<Vec<Attendance>> {
    Json(records.into_iter().map(Into::into).collect())
}

async fn list(
    Extension(svc): Extension<Service>,
) -> Result<Json<Vec<Attendance>>, Error> {
    svc.execute(query::attendances::All::by(()))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn get_by_id(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Attendance>, Error> {
    svc.execute(query::attendance::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|a| Json(a.into()))
        .ok_or_else(Error::not_found)
}

async fn list_by_employee(
    Extension(svc): Extension<Service>,
    Path(number): Path<String>,
) -> Result<Json<Vec<Attendance>>, Error> {
    let Some(number) = api::filter(&number) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::attendances::ByEmployee::by(number))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_date(
    Extension(svc): Extension<Service>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Attendance>>, Error> {
    let Some(date) = api::filter::<Date>(&date) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::attendances::ByDate::by(date))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_status(
    Extension(svc): Extension<Service>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Attendance>>, Error> {
    let Some(status) = api::filter(&status) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::attendances::ByStatus::by(status))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn create(
    Extension(svc): Extension<Service>,
    body: Result<Json<AttendanceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Attendance>), Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreateAttendance::from(input))
        .await
        .map(|a| (StatusCode::CREATED, Json(a.into())))
        .map_err(AsError::into_error)
}

async fn update(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<AttendanceInput>, JsonRejection>,
) -> Result<Json<Attendance>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdateAttendance {
        id,
        attendance: input.into(),
    })
    .await
    .map(|a| Json(a.into()))
    .map_err(AsError::into_error)
}

async fn delete(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeleteAttendance::by(api::id(&id)?))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

async fn check_in(
    Extension(svc): Extension<Service>,
    body: Result<Json<PunchInput>, JsonRejection>,
) -> Result<Json<Attendance>, Error> {
    let PunchInput {
        employee_id,
        location,
    } = api::payload(body)?;
    svc.execute(command::CheckIn {
        employee_id,
        location,
    })
    .await
    .map(|a| Json(a.into()))
    .map_err(AsError::into_error)
}

async fn check_out(
    Extension(svc): Extension<Service>,
    body: Result<Json<PunchInput>, JsonRejection>,
) -> Result<Json<Attendance>, Error> {
    let PunchInput {
        employee_id,
        location,
    } = api::payload(body)?;
    svc.execute(command::CheckOut {
        employee_id,
        location,
    })
    .await
    .map(|a| Json(a.into()))
    .map_err(AsError::into_error)
}

define_error! {
    enum AttendanceError {
        #[code = "ALREADY_CHECKED_IN"]
        #[status = BAD_REQUEST]
        #[message = "Already checked in today"]
        AlreadyCheckedIn,

        #[code = "NOT_CHECKED_IN"]
        #[status = BAD_REQUEST]
        #[message = "No check-in record found for today"]
        NotCheckedIn,

        #[code = "ALREADY_CHECKED_OUT"]
        #[status = BAD_REQUEST]
        #[message = "Already checked out today"]
        AlreadyCheckedOut,

        #[code = "INVALID_ATTENDANCE_PERIOD"]
        #[status = BAD_REQUEST]
        #[message = "`checkOut` must not be before `checkIn`"]
        CheckOutBeforeCheckIn,

        #[code = "ATTENDANCE_EXISTS"]
        #[status = BAD_REQUEST]
        #[message = "Attendance for this employee and date already exists"]
        Exists,
    }
}

impl From<PunchError> for AttendanceError {
    fn from(err: PunchError) -> Self {
        match err {
            PunchError::AlreadyCheckedIn => Self::AlreadyCheckedIn,
            PunchError::NotCheckedIn => Self::NotCheckedIn,
            PunchError::AlreadyCheckedOut => Self::AlreadyCheckedOut,
            PunchError::CheckOutBeforeCheckIn => Self::CheckOutBeforeCheckIn,
        }
    }
}

impl AsError for command::create_attendance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidPunches(e) => Some(AttendanceError::from(*e).into()),
            Self::AttendanceExists => Some(AttendanceError::Exists.into()),
        }
    }
}

impl AsError for command::update_attendance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AttendanceNotExists(_) => Some(Error::not_found()),
            Self::InvalidPunches(e) => Some(AttendanceError::from(*e).into()),
            Self::AttendanceExists => Some(AttendanceError::Exists.into()),
        }
    }
}

impl AsError for command::check_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmployeeNotExists(_) => Some(Error::not_found()),
            Self::Punch(e) => Some(AttendanceError::from(*e).into()),
        }
    }
}

impl AsError for command::check_out::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmployeeNotExists(_) => Some(Error::not_found()),
            Self::Punch(e) => Some(AttendanceError::from(*e).into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{
        command,
        domain::{self, attendance},
    };

    use crate::AsError as _;

    use super::{Attendance, AttendanceInput, PunchInput};

    #[test]
    fn reads_punches_with_default_location() {
        let input: AttendanceInput = serde_json::from_value(json!({
            "employeeId": "EMP-001",
            "date": "2024-07-01",
            "checkIn": {"time": "2024-07-01T09:00:00Z"},
            "checkOut": {"time": "2024-07-01T17:00:00Z", "location": "REMOTE"},
        }))
        .unwrap();

        let cmd = command::CreateAttendance::from(input);
        assert_eq!(
            cmd.check_in.unwrap().location,
            attendance::WorkLocation::Office,
        );
        assert_eq!(
            cmd.check_out.unwrap().location,
            attendance::WorkLocation::Remote,
        );
        assert_eq!(cmd.status, attendance::Status::Present);
    }

    #[test]
    fn punch_needs_employee_only() {
        let input: PunchInput =
            serde_json::from_value(json!({"employeeId": "EMP-001"})).unwrap();

        assert_eq!(input.location, attendance::WorkLocation::Office);
        assert!(serde_json::from_value::<PunchInput>(json!({})).is_err());
    }

    #[test]
    fn serializes_hours_as_numbers() {
        let now = common::DateTime::now();
        let record = domain::Attendance {
            id: attendance::Id::new(),
            employee_id: "EMP-001".parse().unwrap(),
            date: "2024-07-01".parse().unwrap(),
            check_in: None,
            check_out: None,
            working_hours: attendance::Hours::ZERO,
            overtime_hours: attendance::Hours::ZERO,
            status: attendance::Status::Absent,
            notes: None,
            is_manual_entry: true,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let json = serde_json::to_value(Attendance::from(record)).unwrap();
        assert_eq!(json["workingHours"], json!(0.0));
        assert_eq!(json["status"], "ABSENT");
        assert_eq!(json["isManualEntry"], true);
        assert!(json["checkIn"].is_null());
    }

    #[test]
    fn maps_punch_errors_to_bad_request() {
        let err = command::check_in::ExecutionError::Punch(
            attendance::PunchError::AlreadyCheckedIn,
        )
        .as_error();
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "ALREADY_CHECKED_IN");
        assert_eq!(err.message, "Already checked in today");

        let err = command::create_attendance::ExecutionError::AttendanceExists
            .as_error();
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "ATTENDANCE_EXISTS");

        let err = command::check_out::ExecutionError::EmployeeNotExists(
            "EMP-404".parse().unwrap(),
        )
        .as_error();
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }
}
