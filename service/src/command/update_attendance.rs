//! [`Command`] for updating an existing [`Attendance`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{attendance, Attendance},
    infra::{database, Database},
    Service,
};

use super::{create_attendance::DAY_CONSTRAINT, Command, CreateAttendance};

/// [`Command`] for updating an existing [`Attendance`].
///
/// Replaces all the editable fields and recalculates the worked hours. The
/// updated [`Attendance`] counts as a manual entry.
#[derive(Clone, Debug)]
pub struct UpdateAttendance {
    /// ID of the [`Attendance`] to update.
    pub id: attendance::Id,

    /// New state of the [`Attendance`].
    pub attendance: CreateAttendance,
}

impl<Db> Command<UpdateAttendance> for Service<Db>
where
    Db: Database<
            Select<By<Option<Attendance>, attendance::Id>>,
            Ok = Option<Attendance>,
            Err = Traced<database::Error>,
        > + Database<Update<Attendance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Attendance;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateAttendance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateAttendance { id, attendance } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Attendance>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AttendanceNotExists(id))
            .map_err(tracerr::wrap!())?;

        let attendance = attendance
            .into_attendance(
                id,
                existing.created_at,
                DateTime::now().coerce(),
            )
            .map_err(tracerr::from_and_wrap!(=> E))?;
        self.database()
            .execute(Update(attendance.clone()))
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

/// Error of [`UpdateAttendance`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Attendance`] doesn't exist.
    #[display("`Attendance(id: {_0})` does not exist")]
    #[from(ignore)]
    AttendanceNotExists(#[error(not(source))] attendance::Id),

    /// [`Punch`]es of the [`Attendance`] are inconsistent.
    ///
    /// [`Punch`]: attendance::Punch
    #[display("Invalid attendance punches: {_0}")]
    InvalidPunches(attendance::PunchError),

    /// Another [`Attendance`] of the employee on the date is recorded.
    #[display("Attendance for this employee and date already exists")]
    AttendanceExists,
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_attendance, fixture, Command as _},
        domain::attendance::{self, PunchError},
        query::attendance as query,
        Query as _,
    };

    use super::{ExecutionError, UpdateAttendance};

    #[tokio::test]
    async fn recalculates_hours_and_keeps_creation_time() {
        let svc = fixture::service();
        let created = svc
            .execute(create_attendance::spec::command("EMP-001"))
            .await
            .unwrap();

        let mut changes = create_attendance::spec::command("EMP-001");
        changes.check_out =
            Some(create_attendance::spec::punch("2024-07-01T13:00:00Z"));
        changes.status = attendance::Status::HalfDay;
        let updated = svc
            .execute(UpdateAttendance {
                id: created.id,
                attendance: changes,
            })
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.working_hours.to_string(), "4");
        assert_eq!(updated.overtime_hours, attendance::Hours::ZERO);
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, attendance::Status::HalfDay);
    }

    #[tokio::test]
    async fn fails_on_unknown_attendance() {
        let svc = fixture::service();
        let id = attendance::Id::new();

        let err = svc
            .execute(UpdateAttendance {
                id,
                attendance: create_attendance::spec::command("EMP-001"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::AttendanceNotExists(missing) if *missing == id,
        ));
    }

    #[tokio::test]
    async fn rejects_inverted_punches() {
        let svc = fixture::service();
        let created = svc
            .execute(create_attendance::spec::command("EMP-001"))
            .await
            .unwrap();

        let mut changes = create_attendance::spec::command("EMP-001");
        changes.check_out =
            Some(create_attendance::spec::punch("2024-07-01T08:00:00Z"));
        let err = svc
            .execute(UpdateAttendance {
                id: created.id,
                attendance: changes,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::InvalidPunches(PunchError::CheckOutBeforeCheckIn),
        ));
    }
}
