//! [`Command`] for deleting a [`Department`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{department, employee, Department, Employee},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Department`].
///
/// The [`Department`] is kept deactivated rather than removed. Deleting an
/// inactive [`Department`] is not an error.
#[derive(Clone, Copy, Debug)]
pub struct DeleteDepartment {
    /// ID of the [`Department`] to delete.
    pub id: department::Id,
}

impl<Db> Command<DeleteDepartment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Department>, department::Id>>,
            Ok = Option<Department>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Employee>, department::Name>>,
            Ok = Vec<Employee>,
            Err = Traced<database::Error>,
        > + Database<Update<Department>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteDepartment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteDepartment { id } = cmd;

        let mut department = self
            .database()
            .execute(Select(By::<Option<Department>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DepartmentNotExists(id))
            .map_err(tracerr::wrap!())?;
        if !department.is_active {
            return Ok(());
        }

        let active = self
            .database()
            .execute(Select(By::<Vec<Employee>, _>::new(
                department.name.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .filter(|e| e.status == employee::Status::Active)
            .count();
        if active > 0 {
            return Err(tracerr::new!(E::HasActiveEmployees(active)));
        }

        department.is_active = false;
        department.updated_at = DateTime::now().coerce();
        self.database()
            .execute(Update(department))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Department(id: {id})` deactivated");
        Ok(())
    }
}

/// Error of [`DeleteDepartment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Department`] doesn't exist.
    #[display("`Department(id: {_0})` does not exist")]
    #[from(ignore)]
    DepartmentNotExists(#[error(not(source))] department::Id),

    /// [`Department`] still has the provided number of active [`Employee`]s.
    #[display("Cannot delete department with active employees")]
    #[from(ignore)]
    HasActiveEmployees(#[error(not(source))] usize),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            create_department, create_employee, fixture, Command as _,
            UpdateEmployee,
        },
        domain::{department, employee},
        query::{department as query, departments},
        Query as _,
    };

    use super::{DeleteDepartment, ExecutionError};

    #[tokio::test]
    async fn deactivates_department() {
        let svc = fixture::service();
        let created = svc
            .execute(create_department::spec::command("Research", "RND"))
            .await
            .unwrap();

        svc.execute(DeleteDepartment { id: created.id }).await.unwrap();

        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_active);
        let active = svc
            .execute(departments::Active::by(department::Active))
            .await
            .unwrap();
        assert!(active.is_empty());

        svc.execute(DeleteDepartment { id: created.id }).await.unwrap();
    }

    #[tokio::test]
    async fn keeps_department_with_active_employees() {
        let svc = fixture::service();
        let hired = svc
            .execute(create_employee::spec::command("EMP-001"))
            .await
            .unwrap();
        let created = svc
            .execute(create_department::spec::command("Engineering", "ENG"))
            .await
            .unwrap();

        let err = svc
            .execute(DeleteDepartment { id: created.id })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::HasActiveEmployees(1)));
        assert_eq!(
            err.as_ref().to_string(),
            "Cannot delete department with active employees",
        );

        let mut changes = create_employee::spec::command("EMP-001");
        changes.status = employee::Status::Inactive;
        drop(
            svc.execute(UpdateEmployee {
                id: hired.id,
                employee: changes,
            })
            .await
            .unwrap(),
        );
        svc.execute(DeleteDepartment { id: created.id }).await.unwrap();
    }

    #[tokio::test]
    async fn fails_on_unknown_department() {
        let svc = fixture::service();
        let id = department::Id::new();

        let err = svc.execute(DeleteDepartment { id }).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DepartmentNotExists(missing) if *missing == id,
        ));
    }
}
