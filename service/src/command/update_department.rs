//! [`Command`] for updating an existing [`Department`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{department, Department},
    infra::{database, Database},
    Service,
};

use super::{
    create_department::{CODE_CONSTRAINT, NAME_CONSTRAINT},
    Command, CreateDepartment,
};

/// [`Command`] for updating an existing [`Department`].
///
/// Replaces all the editable fields, keeping the creation time.
#[derive(Clone, Debug)]
pub struct UpdateDepartment {
    /// ID of the [`Department`] to update.
    pub id: department::Id,

    /// New state of the [`Department`].
    pub department: CreateDepartment,
}

impl<Db> Command<UpdateDepartment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Department>, department::Id>>,
            Ok = Option<Department>,
            Err = Traced<database::Error>,
        > + Database<Update<Department>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Department;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateDepartment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDepartment { id, department } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Department>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DepartmentNotExists(id))
            .map_err(tracerr::wrap!())?;

        let department = department.into_department(
            id,
            existing.created_at,
            DateTime::now().coerce(),
        );
        self.database()
            .execute(Update(department.clone()))
            .await
            .map_err(|e| {
                let e = e.into_inner();
                if e.is_unique_violation(Some(NAME_CONSTRAINT)) {
                    tracerr::new!(E::NameOccupied)
                } else if e.is_unique_violation(Some(CODE_CONSTRAINT)) {
                    tracerr::new!(E::CodeOccupied)
                } else {
                    tracerr::new!(E::Db(e))
                }
            })?;

        Ok(department)
    }
}

/// Error of [`UpdateDepartment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Department`] doesn't exist.
    #[display("`Department(id: {_0})` does not exist")]
    #[from(ignore)]
    DepartmentNotExists(#[error(not(source))] department::Id),

    /// [`department::Name`] is occupied by another [`Department`].
    #[display("Department name already exists")]
    NameOccupied,

    /// [`department::Code`] is occupied by another [`Department`].
    #[display("Department code already exists")]
    CodeOccupied,
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_department, fixture, Command as _},
        domain::department,
        query::department as query,
        Query as _,
    };

    use super::{ExecutionError, UpdateDepartment};

    #[tokio::test]
    async fn replaces_fields_and_keeps_creation_time() {
        let svc = fixture::service();
        let created = svc
            .execute(create_department::spec::command("Engineering", "ENG"))
            .await
            .unwrap();

        let mut changes =
            create_department::spec::command("Platform Engineering", "ENG");
        changes.budget = None;
        let updated = svc
            .execute(UpdateDepartment {
                id: created.id,
                department: changes,
            })
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name.to_string(), "Platform Engineering");
        assert!(stored.budget.is_none());
    }

    #[tokio::test]
    async fn rejects_code_of_another_department() {
        let svc = fixture::service();
        drop(
            svc.execute(create_department::spec::command("Engineering", "ENG"))
                .await
                .unwrap(),
        );
        let research = svc
            .execute(create_department::spec::command("Research", "RND"))
            .await
            .unwrap();

        let err = svc
            .execute(UpdateDepartment {
                id: research.id,
                department: create_department::spec::command(
                    "Research", "ENG",
                ),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::CodeOccupied));
    }

    #[tokio::test]
    async fn fails_on_unknown_department() {
        let svc = fixture::service();
        let id = department::Id::new();

        let err = svc
            .execute(UpdateDepartment {
                id,
                department: create_department::spec::command(
                    "Engineering",
                    "ENG",
                ),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DepartmentNotExists(missing) if *missing == id,
        ));
    }
}
