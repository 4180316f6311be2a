//! [`Leave`]-related REST API definitions.

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
    domain::{self, employee, leave},
    query, Query as _,
};

use crate::{api, define_error, AsError, Error, Service};

/// Builds the [`Router`] of [`Leave`] endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/leaves", get(list).post(create))
        .route("/leaves/:id", get(get_by_id).put(update).delete(delete))
        .route("/leaves/:id/approve", post(approve))
        .route("/leaves/:id/reject", post(reject))
        .route("/leaves/employee/:employee_id", get(list_by_employee))
        .route("/leaves/status/:status", get(list_by_status))
        .route("/leaves/type/:leave_type", get(list_by_type))
        .route("/leaves/approver/:approver", get(list_by_approver))
}

/// Leave request of an employee.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    /// ID of this [`Leave`].
    pub id: leave::Id,

    /// Business number of the requesting employee.
    pub employee_id: employee::Number,

    /// Kind of this [`Leave`].
    pub leave_type: leave::Kind,

    /// First day of this [`Leave`].
    pub start_date: Option<Date>,

    /// Last day of this [`Leave`].
    pub end_date: Option<Date>,

    /// Number of days this [`Leave`] takes.
    pub total_days: Option<leave::Days>,

    /// Indicator whether this [`Leave`] takes a half of a day.
    pub half_day: bool,

    /// Reason of this [`Leave`].
    pub reason: Option<String>,

    /// Status of this [`Leave`].
    pub status: leave::Status,

    /// Who decided on this [`Leave`].
    pub approved_by: Option<leave::Approver>,

    /// Comments on this [`Leave`].
    pub comments: Option<String>,

    /// [`DateTime`] when this [`Leave`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`Leave`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::Leave> for Leave {
    fn from(leave: domain::Leave) -> Self {
        let domain::Leave {
            id,
            employee_id,
            kind,
            start_date,
            end_date,
            total_days,
            half_day,
            reason,
            status,
            approved_by,
            comments,
            created_at,
            updated_at,
        } = leave;

        Self {
            id,
            employee_id,
            leave_type: kind,
            start_date,
            end_date,
            total_days,
            half_day,
            reason,
            status,
            approved_by,
            comments,
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Editable state of a [`Leave`].
///
/// Status and approver are ignored, as they're changed by approving or
/// rejecting only.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveInput {
    /// Business number of the requesting employee.
    pub employee_id: employee::Number,

    /// Kind of the [`Leave`].
    pub leave_type: leave::Kind,

    /// First day of the [`Leave`].
    #[serde(default)]
    pub start_date: Option<Date>,

    /// Last day of the [`Leave`].
    #[serde(default)]
    pub end_date: Option<Date>,

    /// Indicator whether the [`Leave`] takes a half of a day.
    #[serde(default)]
    pub half_day: bool,

    /// Reason of the [`Leave`].
    #[serde(default)]
    pub reason: Option<String>,

    /// Comments on the [`Leave`].
    #[serde(default)]
    pub comments: Option<String>,
}

impl From<LeaveInput> for command::CreateLeave {
    fn from(input: LeaveInput) -> Self {
        let LeaveInput {
            employee_id,
            leave_type,
            start_date,
            end_date,
            half_day,
            reason,
            comments,
        } = input;

        Self {
            employee_id,
            kind: leave_type,
            start_date,
            end_date,
            half_day,
            reason,
            comments,
        }
    }
}

/// Body of an approval request.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveInput {
    /// Who approves the [`Leave`].
    #[serde(default)]
    pub approved_by: Option<leave::Approver>,
}

/// Body of a rejection request.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectInput {
    /// Who rejects the [`Leave`].
    #[serde(default)]
    pub rejected_by: Option<leave::Approver>,

    /// Reason of the rejection.
    #[serde(default)]
    pub comments: Option<String>,
}

/// Converts [`domain::Leave`]s into a response.
fn list_of(leaves: Vec<domain::Leave>) -> Json<Vec<Leave>> {
    Json(leaves.into_iter().map(Into::into).collect())
}

async fn list(
    Extension(svc): Extension<Service>,
) -> Result<Json<Vec<Leave>>, Error> {
    svc.execute(query::leaves::All::by(()))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn get_by_id(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Leave>, Error> {
    svc.execute(query::leave::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|l| Json(l.into()))
        .ok_or_else(Error::not_found)
}

async fn list_by_employee(
    Extension(svc): Extension<Service>,
    Path(number): Path<String>,
) -> Result<Json<Vec<Leave>>, Error> {
    let Some(number) = api::filter(&number) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::leaves::ByEmployee::by(number))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_status(
    Extension(svc): Extension<Service>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Leave>>, Error> {
    let Some(status) = api::filter(&status) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::leaves::ByStatus::by(status))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_approver(
    Extension(svc): Extension<Service>,
    Path(approver): Path<String>,
) -> Result<Json<Vec<Leave>>, Error> {
    let Some(approver) = api::filter(&approver) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::leaves::ByApprover::by(approver))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_type(
    Extension(svc): Extension<Service>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<Leave>>, Error> {
    let Some(kind) = api::filter(&kind) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::leaves::ByKind::by(kind))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn create(
    Extension(svc): Extension<Service>,
    body: Result<Json<LeaveInput>, JsonRejection>,
) -> Result<Json<Leave>, Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreateLeave::from(input))
        .await
        .map(|l| Json(l.into()))
        .map_err(AsError::into_error)
}

async fn update(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<LeaveInput>, JsonRejection>,
) -> Result<Json<Leave>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdateLeave {
        id,
        leave: input.into(),
    })
    .await
    .map(|l| Json(l.into()))
    .map_err(AsError::into_error)
}

async fn approve(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<ApproveInput>, JsonRejection>,
) -> Result<Json<Leave>, Error> {
    let id = api::id(&id)?;
    let ApproveInput { approved_by } = api::payload(body)?;
    svc.execute(command::ApproveLeave { id, approved_by })
        .await
        .map(|l| Json(l.into()))
        .map_err(AsError::into_error)
}

async fn reject(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<RejectInput>, JsonRejection>,
) -> Result<Json<Leave>, Error> {
    let id = api::id(&id)?;
    let RejectInput {
        rejected_by,
        comments,
    } = api::payload(body)?;
    svc.execute(command::RejectLeave {
        id,
        rejected_by,
        comments,
    })
    .await
    .map(|l| Json(l.into()))
    .map_err(AsError::into_error)
}

async fn delete(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeleteLeave::by(api::id(&id)?))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

define_error! {
    enum PeriodError {
        #[code = "INVALID_LEAVE_PERIOD"]
        #[status = BAD_REQUEST]
        #[message = "`endDate` must not be before `startDate`"]
        Inverted,
    }
}

impl AsError for command::create_leave::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidPeriod(_) => Some(PeriodError::Inverted.into()),
        }
    }
}

impl AsError for command::update_leave::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidPeriod(_) => Some(PeriodError::Inverted.into()),
            Self::LeaveNotExists(_) => Some(Error::not_found()),
        }
    }
}

impl AsError for command::approve_leave::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LeaveNotExists(_) => Some(Error::not_found()),
        }
    }
}

impl AsError for command::reject_leave::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LeaveNotExists(_) => Some(Error::not_found()),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Date;
    use serde_json::json;
    use service::{
        command,
        domain::{self, leave},
    };

    use crate::AsError as _;

    use super::{Leave, LeaveInput, RejectInput};

    #[test]
    fn serializes_leave_in_camel_case() {
        let created_at = common::DateTime::from_rfc3339("2024-06-01T10:00:00Z")
            .unwrap();
        let leave = Leave::from(domain::Leave {
            id: leave::Id::default(),
            employee_id: "EMP-001".parse().unwrap(),
            kind: leave::Kind::Sick,
            start_date: Some("2024-07-01".parse().unwrap()),
            end_date: Some("2024-07-01".parse().unwrap()),
            total_days: Some(
                leave::Days::count(
                    "2024-07-01".parse().unwrap(),
                    "2024-07-01".parse().unwrap(),
                    true,
                )
                .unwrap(),
            ),
            half_day: true,
            reason: None,
            status: leave::Status::Pending,
            approved_by: None,
            comments: None,
            created_at: created_at.coerce(),
            updated_at: created_at.coerce(),
        });

        let json = serde_json::to_value(leave).unwrap();

        assert_eq!(json["employeeId"], "EMP-001");
        assert_eq!(json["leaveType"], "SICK");
        assert_eq!(json["totalDays"], 0.5);
        assert_eq!(json["halfDay"], true);
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["createdAt"], "2024-06-01T10:00:00Z");
        assert!(json["approvedBy"].is_null());
    }

    #[test]
    fn ignores_status_in_input() {
        let input: LeaveInput = serde_json::from_value(json!({
            "employeeId": "EMP-001",
            "leaveType": "ANNUAL",
            "startDate": "2024-07-01",
            "status": "APPROVED",
        }))
        .unwrap();

        let cmd = command::CreateLeave::from(input);
        assert_eq!(cmd.kind, leave::Kind::Annual);
        assert_eq!(cmd.start_date, Some(Date::from_ymd(2024, 7, 1).unwrap()));
        assert!(!cmd.half_day);
    }

    #[test]
    fn accepts_empty_reject_body() {
        let input: RejectInput = serde_json::from_value(json!({})).unwrap();

        assert!(input.rejected_by.is_none());
        assert!(input.comments.is_none());
    }

    #[test]
    fn maps_inverted_period_to_bad_request() {
        let err = command::create_leave::ExecutionError::InvalidPeriod(
            leave::Days::count(
                "2024-07-05".parse().unwrap(),
                "2024-07-01".parse().unwrap(),
                false,
            )
            .unwrap_err(),
        );

        let err = err.as_error();

        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_LEAVE_PERIOD");
    }

    #[test]
    fn maps_missing_leave_to_not_found() {
        let err = command::approve_leave::ExecutionError::LeaveNotExists(
            leave::Id::default(),
        );

        assert_eq!(err.as_error().status_code, http::StatusCode::NOT_FOUND);
    }
}
