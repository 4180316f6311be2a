//! [`Command`] for recording a new [`Attendance`] manually.

use common::{operations::Insert, Date, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        attendance::{self, Punch, PunchError},
        employee, Attendance,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// Name of the unique constraint on an [`Attendance`] per employee and day.
pub(crate) const DAY_CONSTRAINT: &str = "attendances_employee_id_date_key";

/// [`Command`] for recording a new [`Attendance`] manually.
///
/// Also describes the full state of an [`Attendance`] for the
/// [`UpdateAttendance`] [`Command`].
///
/// [`UpdateAttendance`]: super::UpdateAttendance
#[derive(Clone, Debug)]
pub struct CreateAttendance {
    /// [`employee::Number`] of the attending employee.
    pub employee_id: employee::Number,

    /// [`Date`] of a new [`Attendance`].
    pub date: Date,

    /// Check-in [`Punch`] of a new [`Attendance`].
    pub check_in: Option<Punch>,

    /// Check-out [`Punch`] of a new [`Attendance`].
    pub check_out: Option<Punch>,

    /// [`attendance::Status`] of a new [`Attendance`].
    pub status: attendance::Status,

    /// Notes on a new [`Attendance`].
    pub notes: Option<String>,
}

impl CreateAttendance {
    /// Builds an [`Attendance`] with the provided [`attendance::Id`] and
    /// [`DateTime`]s out of this [`CreateAttendance`], calculating the worked
    /// hours.
    ///
    /// # Errors
    ///
    /// If the [`Punch`]es are inconsistent.
    pub(crate) fn into_attendance(
        self,
        id: attendance::Id,
        created_at: attendance::CreationDateTime,
        updated_at: attendance::UpdateDateTime,
    ) -> Result<Attendance, PunchError> {
        let Self {
            employee_id,
            date,
            check_in,
            check_out,
            status,
            notes,
        } = self;

        let mut attendance = Attendance {
            id,
            employee_id,
            date,
            check_in,
            check_out,
            working_hours: attendance::Hours::ZERO,
            overtime_hours: attendance::Hours::ZERO,
            status,
            notes,
            is_manual_entry: true,
            created_at,
            updated_at,
        };
        attendance.recalculate()?;
        Ok(attendance)
    }
}

impl<Db> Command<CreateAttendance> for Service<Db>
where
    Db: Database<Insert<Attendance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Attendance;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAttendance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let now = DateTime::now();
        let attendance = cmd
            .into_attendance(attendance::Id::new(), now.coerce(), now.coerce())
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Insert(attendance.clone()))
            .await
            .map_err(|e| {
                let e = e.into_inner();
                if e.is_unique_violation(Some(DAY_CONSTRAINT)) {
                    tracerr::new!(E::AttendanceExists)
                } else {
                    tracerr::new!(E::Db(e))
                }
            })?;

        Ok(attendance)
    }
}

/// Error of [`CreateAttendance`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Punch`]es of the [`Attendance`] are inconsistent.
    #[display("Invalid attendance punches: {_0}")]
    InvalidPunches(PunchError),

    /// [`Attendance`] of the employee on the [`Date`] is recorded already.
    #[display("Attendance for this employee and date already exists")]
    AttendanceExists,
}

#[cfg(test)]
pub(crate) mod spec {
    use common::DateTime;

    use crate::{
        command::{fixture, Command as _},
        domain::attendance::{self, Punch, PunchError, WorkLocation},
        query::{attendance as query, attendances},
        Query as _,
    };

    use super::{CreateAttendance, ExecutionError};

    /// Returns a [`Punch`] at the provided RFC 3339 time.
    pub(crate) fn punch(at: &str) -> Punch {
        Punch {
            at: DateTime::from_rfc3339(at).unwrap().coerce(),
            location: WorkLocation::Office,
        }
    }

    /// Returns a valid [`CreateAttendance`] [`Command`] for the provided
    /// employee on `2024-07-01`.
    pub(crate) fn command(employee_id: &str) -> CreateAttendance {
        CreateAttendance {
            employee_id: employee_id.parse().unwrap(),
            date: "2024-07-01".parse().unwrap(),
            check_in: Some(punch("2024-07-01T09:00:00Z")),
            check_out: Some(punch("2024-07-01T17:30:00Z")),
            status: attendance::Status::Present,
            notes: None,
        }
    }

    #[tokio::test]
    async fn records_manual_entry_with_hours() {
        let svc = fixture::service();

        let created = svc.execute(command("EMP-001")).await.unwrap();

        assert!(created.is_manual_entry);
        assert_eq!(created.working_hours.to_string(), "8.5");
        assert_eq!(created.overtime_hours.to_string(), "0.5");
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.date, created.date);
    }

    #[tokio::test]
    async fn allows_single_record_per_employee_and_day() {
        let svc = fixture::service();
        drop(svc.execute(command("EMP-001")).await.unwrap());
        drop(svc.execute(command("EMP-002")).await.unwrap());

        let err = svc.execute(command("EMP-001")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::AttendanceExists));
        let all = svc.execute(attendances::All::by(())).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn rejects_check_out_without_check_in() {
        let svc = fixture::service();
        let mut cmd = command("EMP-001");
        cmd.check_in = None;

        let err = svc.execute(cmd).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::InvalidPunches(PunchError::NotCheckedIn),
        ));
    }
}
