//! [`Command`] for checking an [`Employee`] out for today.

use common::{
    operations::{By, Select, Update},
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

/// [`Command`] for checking an [`Employee`] out for today.
///
/// Completes the [`Attendance`] of the current UTC date, calculating the
/// worked hours.
#[derive(Clone, Debug)]
pub struct CheckOut {
    /// [`employee::Number`] of the [`Employee`] checking out.
    pub employee_id: employee::Number,

    /// [`attendance::WorkLocation`] the [`Employee`] checks out at.
    pub location: attendance::WorkLocation,
}

impl<Db> Command<CheckOut> for Service<Db>
where
    Db: Database<
            Select<By<read::Exists<Employee>, employee::Number>>,
            Ok = read::Exists<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Attendance>, attendance::Day>>,
            Ok = Option<Attendance>,
            Err = Traced<database::Error>,
        > + Database<Update<Attendance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Attendance;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CheckOut) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CheckOut {
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
        let day = attendance::Day {
            employee_id,
            date: now.date(),
        };
        let mut attendance = self
            .database()
            .execute(Select(By::<Option<Attendance>, _>::new(day)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::Punch(PunchError::NotCheckedIn))
            .map_err(tracerr::wrap!())?;

        attendance
            .check_out(Punch {
                at: now.coerce(),
                location,
            })
            .map_err(tracerr::from_and_wrap!(=> E))?;
        attendance.updated_at = now.coerce();
        self.database()
            .execute(Update(attendance.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(
            "`Employee(number: {})` checked out after {} hours",
            attendance.employee_id,
            attendance.working_hours,
        );
        Ok(attendance)
    }
}

/// Error of [`CheckOut`] [`Command`] execution.
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
    use crate::{
        command::{create_employee, fixture, CheckIn, Command as _},
        domain::attendance::{self, PunchError},
        infra::Memory,
        query::attendances,
        Query as _, Service,
    };

    use super::{CheckOut, ExecutionError};

    fn command(employee_id: &str) -> CheckOut {
        CheckOut {
            employee_id: employee_id.parse().unwrap(),
            location: attendance::WorkLocation::Office,
        }
    }

    async fn hired(svc: &Service<Memory>) {
        drop(
            svc.execute(create_employee::spec::command("EMP-001"))
                .await
                .unwrap(),
        );
    }

    #[tokio::test]
    async fn completes_today_attendance() {
        let svc = fixture::service();
        hired(&svc).await;
        let opened = svc
            .execute(CheckIn {
                employee_id: "EMP-001".parse().unwrap(),
                location: attendance::WorkLocation::Office,
            })
            .await
            .unwrap();

        let closed = svc.execute(command("EMP-001")).await.unwrap();

        assert_eq!(closed.id, opened.id);
        assert!(closed.check_out.is_some());
        assert!(closed.working_hours >= attendance::Hours::ZERO);
        assert_eq!(closed.overtime_hours, attendance::Hours::ZERO);
        let all = svc.execute(attendances::All::by(())).await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].check_out.is_some());

        let err = svc.execute(command("EMP-001")).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Punch(PunchError::AlreadyCheckedOut),
        ));
    }

    #[tokio::test]
    async fn requires_check_in() {
        let svc = fixture::service();
        hired(&svc).await;

        let err = svc.execute(command("EMP-001")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Punch(PunchError::NotCheckedIn),
        ));
        assert_eq!(
            err.as_ref().to_string(),
            "No check-in record found for today",
        );
    }
}
