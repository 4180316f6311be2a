//! [`Command`] definition.

pub mod approve_leave;
pub mod authenticate_user;
pub mod check_in;
pub mod check_out;
pub mod create_attendance;
pub mod create_department;
pub mod create_employee;
pub mod create_job_application;
pub mod create_job_posting;
pub mod create_leave;
pub mod create_payroll;
pub mod create_performance;
pub mod delete_department;
pub mod register_user;
pub mod reject_leave;
pub mod update_attendance;
pub mod update_department;
pub mod update_employee;
pub mod update_job_application;
pub mod update_job_posting;
pub mod update_leave;
pub mod update_payroll;
pub mod update_performance;

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::{
        attendance, employee, job_application, job_posting, leave, payroll,
        performance, Attendance, Employee, JobApplication, JobPosting, Leave,
        Payroll, Performance,
    },
    infra::{database, Database},
    Service,
};

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    approve_leave::ApproveLeave,
    authenticate_user::{AuthenticateUser, Authenticated},
    check_in::CheckIn,
    check_out::CheckOut,
    create_attendance::CreateAttendance,
    create_department::CreateDepartment,
    create_employee::CreateEmployee,
    create_job_application::CreateJobApplication,
    create_job_posting::CreateJobPosting, create_leave::CreateLeave,
    create_payroll::CreatePayroll, create_performance::CreatePerformance,
    delete_department::DeleteDepartment,
    register_user::RegisterUser, reject_leave::RejectLeave,
    update_attendance::UpdateAttendance,
    update_department::UpdateDepartment,
    update_employee::UpdateEmployee,
    update_job_application::UpdateJobApplication,
    update_job_posting::UpdateJobPosting, update_leave::UpdateLeave,
    update_payroll::UpdatePayroll, update_performance::UpdatePerformance,
};

/// [`Command`] [`Delete`]ing a `T`ype from a [`Database`].
///
/// Deleting a missing entity is not an error.
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseDelete<T>(T);

impl<E, Id> DatabaseDelete<By<E, Id>> {
    /// Creates a new [`DatabaseDelete`] removing an `E`ntity by its `Id`.
    #[must_use]
    pub fn by(id: Id) -> Self {
        Self(By::new(id))
    }
}

impl<Db, E, Id> Command<DatabaseDelete<By<E, Id>>> for Service<Db>
where
    Db: Database<Delete<By<E, Id>>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseDelete(by): DatabaseDelete<By<E, Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Delete(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Deletes an [`Employee`] by its [`employee::Id`].
pub type DeleteEmployee = DatabaseDelete<By<Employee, employee::Id>>;

/// Deletes a [`Leave`] by its [`leave::Id`].
pub type DeleteLeave = DatabaseDelete<By<Leave, leave::Id>>;

/// Deletes a [`Payroll`] by its [`payroll::Id`].
pub type DeletePayroll = DatabaseDelete<By<Payroll, payroll::Id>>;

/// Deletes a [`JobPosting`] by its [`job_posting::Id`].
pub type DeleteJobPosting = DatabaseDelete<By<JobPosting, job_posting::Id>>;

/// Deletes a [`JobApplication`] by its [`job_application::Id`].
pub type DeleteJobApplication =
    DatabaseDelete<By<JobApplication, job_application::Id>>;

/// Deletes a [`Performance`] review by its [`performance::Id`].
pub type DeletePerformance =
    DatabaseDelete<By<Performance, performance::Id>>;

/// Deletes an [`Attendance`] by its [`attendance::Id`].
pub type DeleteAttendance = DatabaseDelete<By<Attendance, attendance::Id>>;

#[cfg(test)]
pub(crate) mod fixture {
    //! Shared fixtures for [`Command`] tests.

    use crate::{infra::Memory, Config, Service};

    #[cfg(doc)]
    use super::Command;

    /// Creates a new [`Service`] backed by an empty [`Memory`] database.
    pub(crate) fn service() -> Service<Memory> {
        Service::new(Config::default(), Memory::default())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_employee, create_payroll, Command as _},
        query, Query as _,
    };

    use super::{fixture, DeleteEmployee, DeletePayroll};

    #[tokio::test]
    async fn deleted_employee_is_not_found() {
        let svc = fixture::service();
        let kept = svc
            .execute(create_employee::spec::command("EMP-001"))
            .await
            .unwrap();
        let deleted = svc
            .execute(create_employee::spec::command("EMP-002"))
            .await
            .unwrap();

        svc.execute(DeleteEmployee::by(deleted.id)).await.unwrap();

        let found = svc
            .execute(query::employee::ById::by(deleted.id))
            .await
            .unwrap();
        assert!(found.is_none());
        let exists = svc
            .execute(query::employee::ExistsByNumber::by(deleted.number))
            .await
            .unwrap();
        assert!(!exists.get());
        let remaining = svc.execute(query::employees::All::by(())).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_an_error() {
        let svc = fixture::service();
        let created = svc
            .execute(create_payroll::spec::command("EMP-001"))
            .await
            .unwrap();

        svc.execute(DeletePayroll::by(created.id)).await.unwrap();
        svc.execute(DeletePayroll::by(created.id)).await.unwrap();

        let found = svc
            .execute(query::payroll::ById::by(created.id))
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
