//! [`Command`] for updating an existing [`Employee`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{employee, Employee},
    infra::{database, Database},
    Service,
};

use super::{Command, CreateEmployee};

/// [`Command`] for updating an existing [`Employee`].
///
/// Replaces all the editable fields, keeping the creation time.
#[derive(Clone, Debug)]
pub struct UpdateEmployee {
    /// ID of the [`Employee`] to update.
    pub id: employee::Id,

    /// New state of the [`Employee`].
    pub employee: CreateEmployee,
}

impl<Db> Command<UpdateEmployee> for Service<Db>
where
    Db: Database<
            Select<By<Option<Employee>, employee::Id>>,
            Ok = Option<Employee>,
            Err = Traced<database::Error>,
        > + Database<Update<Employee>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Employee;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateEmployee,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateEmployee { id, employee } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Employee>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EmployeeNotExists(id))
            .map_err(tracerr::wrap!())?;

        let employee = employee.into_employee(
            id,
            existing.created_at,
            DateTime::now().coerce(),
        );
        self.database()
            .execute(Update(employee.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(employee)
    }
}

/// Error of [`UpdateEmployee`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Employee`] doesn't exist.
    #[display("`Employee(id: {_0})` does not exist")]
    #[from(ignore)]
    EmployeeNotExists(#[error(not(source))] employee::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_employee, fixture, Command as _},
        domain::{employee, Employee},
        query::employee as query,
        Query as _,
    };

    use super::{ExecutionError, UpdateEmployee};

    #[tokio::test]
    async fn replaces_fields_and_keeps_creation_time() {
        let svc = fixture::service();
        let created: Employee = svc
            .execute(create_employee::spec::command("EMP-001"))
            .await
            .unwrap();

        let mut changes = create_employee::spec::command("EMP-001");
        changes.status = employee::Status::OnLeave;
        changes.manager = None;
        let updated = svc
            .execute(UpdateEmployee {
                id: created.id,
                employee: changes,
            })
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, employee::Status::OnLeave);
        assert!(stored.manager.is_none());
    }

    #[tokio::test]
    async fn fails_on_unknown_employee() {
        let svc = fixture::service();
        let id = employee::Id::new();

        let err = svc
            .execute(UpdateEmployee {
                id,
                employee: create_employee::spec::command("EMP-001"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::EmployeeNotExists(missing) if *missing == id,
        ));
    }
}
