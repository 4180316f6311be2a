//! [`Command`] for creating a new [`Department`].

use common::{operations::Insert, Date, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{department, employee, Department},
    infra::{database, Database},
    Service,
};

use super::Command;

/// Name of the unique constraint on [`department::Name`]s.
pub(crate) const NAME_CONSTRAINT: &str = "departments_name_key";

/// Name of the unique constraint on [`department::Code`]s.
pub(crate) const CODE_CONSTRAINT: &str = "departments_code_key";

/// [`Command`] for creating a new [`Department`].
///
/// Also describes the full state of a [`Department`] for the
/// [`UpdateDepartment`] [`Command`].
///
/// [`UpdateDepartment`]: super::UpdateDepartment
#[derive(Clone, Debug)]
pub struct CreateDepartment {
    /// [`department::Name`] of a new [`Department`].
    pub name: department::Name,

    /// [`department::Code`] of a new [`Department`].
    pub code: department::Code,

    /// Description of a new [`Department`].
    pub description: Option<String>,

    /// [`employee::Number`] of the manager of a new [`Department`].
    pub manager: Option<employee::Number>,

    /// [`department::Budget`] of a new [`Department`].
    pub budget: Option<department::Budget>,

    /// [`department::Location`] of a new [`Department`].
    pub location: Option<department::Location>,

    /// ID of the parent of a new [`Department`].
    pub parent: Option<department::Id>,

    /// Indicator whether a new [`Department`] is in use.
    pub is_active: bool,

    /// Establishment [`Date`] of a new [`Department`].
    pub established_date: Option<Date>,
}

impl CreateDepartment {
    /// Builds a [`Department`] with the provided [`department::Id`] and
    /// [`DateTime`]s out of this [`CreateDepartment`].
    pub(crate) fn into_department(
        self,
        id: department::Id,
        created_at: department::CreationDateTime,
        updated_at: department::UpdateDateTime,
    ) -> Department {
        let Self {
            name,
            code,
            description,
            manager,
            budget,
            location,
            parent,
            is_active,
            established_date,
        } = self;

        Department {
            id,
            name,
            code,
            description,
            manager,
            budget,
            location,
            parent,
            is_active,
            established_date,
            created_at,
            updated_at,
        }
    }
}

impl<Db> Command<CreateDepartment> for Service<Db>
where
    Db: Database<Insert<Department>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Department;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateDepartment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let now = DateTime::now();
        let department = cmd.into_department(
            department::Id::new(),
            now.coerce(),
            now.coerce(),
        );

        self.database()
            .execute(Insert(department.clone()))
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

/// Error of [`CreateDepartment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`department::Name`] is already occupied.
    #[display("Department name already exists")]
    NameOccupied,

    /// [`department::Code`] is already occupied.
    #[display("Department code already exists")]
    CodeOccupied,
}

#[cfg(test)]
pub(crate) mod spec {
    use crate::{
        command::{fixture, Command as _},
        query::department as query,
        Query as _,
    };

    use super::{CreateDepartment, ExecutionError};

    /// Returns a valid [`CreateDepartment`] [`Command`] with the provided
    /// name and code.
    pub(crate) fn command(name: &str, code: &str) -> CreateDepartment {
        CreateDepartment {
            name: name.parse().unwrap(),
            code: code.parse().unwrap(),
            description: Some("Builds the product".into()),
            manager: Some("MGR-1".parse().unwrap()),
            budget: Some(
                "250000"
                    .parse::<common::Amount>()
                    .unwrap()
                    .try_into()
                    .unwrap(),
            ),
            location: Some("Berlin".parse().unwrap()),
            parent: None,
            is_active: true,
            established_date: Some("2020-01-01".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn stores_department_with_uppercase_code() {
        let svc = fixture::service();

        let created = svc.execute(command("Engineering", "eng")).await.unwrap();

        assert_eq!(created.code.to_string(), "ENG");
        assert_eq!(
            created.created_at.coerce::<()>(),
            created.updated_at.coerce::<()>(),
        );
        let stored = svc
            .execute(query::ByCode::by("ENG".parse().unwrap()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, created.id);
    }

    #[tokio::test]
    async fn rejects_occupied_name_and_code() {
        let svc = fixture::service();
        drop(svc.execute(command("Engineering", "ENG")).await.unwrap());

        let err = svc
            .execute(command("Engineering", "ENG2"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NameOccupied));

        let err = svc.execute(command("Research", "eng")).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CodeOccupied));
    }
}
