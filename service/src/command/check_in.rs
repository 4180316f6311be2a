//! [`Command`] for checking an [`Employee`] in for today.

use common::{
    operations::{By, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        attendance::{self, Punch, PunchError},
        employee, Attendance, Employee,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for checking an [`Employee`] in for today.
///
/// Today is the current UTC date. Creates the [`Attendance`] of the day if
/// there is none yet.
#[derive(Clone, Debug)]
pub struct CheckIn {
    /// [`employee::Number`] of the [`Employee`] checking in.
    pub employee_id: employee::Number,

    /// [`attendance::WorkLocation`] the [`Employee`] checks in at.
    pub location: attendance::WorkLocation,
}

impl<Db> Command<CheckIn> for Service<Db>
where
    Db: Database<
            Select<By<read::Exists<Employee>, employee::Number>>,
            Ok = read::Exists<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Attendance>, attendance::Day>>,
            Ok = Option<Attendance>,
            Err = Traced<database::Error>,
        > + Database<Insert<Attendance>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Attendance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Attendance;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CheckIn) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CheckIn {
            employee_id,
            location,
        } = cmd;

        let exists = self
            .database()
            .execute(Select(By::<read::Exists<Employee>, _>::new(
                employee_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !exists.get() {
            return Err(tracerr::new!(E::EmployeeNotExists(employee_id)));
        }

        let now = DateTime::now();
        let punch = Punch {
            at: now.coerce(),
            location,
        };
        let day = attendance::Day {
            employee_id: employee_id.clone(),
            date: now.date(),
        };
        let existing = self
            .database()
            .execute(Select(By::<Option<Attendance>, _>::new(day)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let attendance = if let Some(mut attendance) = existing {
            attendance
                .check_in(punch)
                .map_err(tracerr::from_and_wrap!(=> E))?;
            attendance.updated_at = now.coerce();
            self.database()
                .execute(Update(attendance.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            attendance
        } else {
            let attendance = Attendance {
                id: attendance::Id::new(),
                employee_id,
                date: now.date(),
                check_in: Some(punch),
                check_out: None,
                working_hours: attendance::Hours::ZERO,
                overtime_hours: attendance::Hours::ZERO,
                status: attendance::Status::Present,
                notes: None,
                is_manual_entry: false,
                created_at: now.coerce(),
                updated_at: now.coerce(),
            };
            self.database()
                .execute(Insert(attendance.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            attendance
        };

        log::info!(
            "`Employee(number: {})` checked in at {}",
            attendance.employee_id,
            punch.at.to_rfc3339(),
        );
        Ok(attendance)
    }
}

/// Error of [`CheckIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Employee`] doesn't exist.
    #[display("`Employee(number: {_0})` does not exist")]
    #[from(ignore)]
    EmployeeNotExists(#[error(not(source))] employee::Number),

    /// [`Attendance`] of today doesn't accept the [`Punch`].
    #[display("{_0}")]
    Punch(PunchError),
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::{
        command::{create_employee, fixture, Command as _},
        domain::attendance::{self, PunchError},
        query::attendance as query,
        Query as _,
    };

    use super::{CheckIn, ExecutionError};

    fn command(employee_id: &str) -> CheckIn {
        CheckIn {
            employee_id: employee_id.parse().unwrap(),
            location: attendance::WorkLocation::Remote,
        }
    }

    #[tokio::test]
    async fn opens_today_attendance() {
        let svc = fixture::service();
        drop(
            svc.execute(create_employee::spec::command("EMP-001"))
                .await
                .unwrap(),
        );

        let checked = svc.execute(command("EMP-001")).await.unwrap();

        assert_eq!(checked.date, DateTime::now().date());
        assert_eq!(checked.status, attendance::Status::Present);
        assert!(!checked.is_manual_entry);
        assert!(checked.check_out.is_none());
        let punch = checked.check_in.unwrap();
        assert_eq!(punch.location, attendance::WorkLocation::Remote);
        let stored = svc
            .execute(query::ByDay::by(attendance::Day {
                employee_id: checked.employee_id.clone(),
                date: checked.date,
            }))
            .await
            .unwrap();
        assert_eq!(stored.map(|a| a.id), Some(checked.id));
    }

    #[tokio::test]
    async fn refuses_second_check_in() {
        let svc = fixture::service();
        drop(
            svc.execute(create_employee::spec::command("EMP-001"))
                .await
                .unwrap(),
        );
        drop(svc.execute(command("EMP-001")).await.unwrap());

        let err = svc.execute(command("EMP-001")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Punch(PunchError::AlreadyCheckedIn),
        ));
        assert_eq!(err.as_ref().to_string(), "Already checked in today");
    }

    #[tokio::test]
    async fn requires_known_employee() {
        let svc = fixture::service();

        let err = svc.execute(command("EMP-404")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::EmployeeNotExists(n) if n.to_string() == "EMP-404",
        ));
    }
}
