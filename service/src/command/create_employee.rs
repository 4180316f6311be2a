//! [`Command`] for creating a new [`Employee`].

use common::{operations::Insert, Amount, Date, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{department, employee, Email, Employee},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Employee`].
///
/// Also describes the full state of an [`Employee`] for the
/// [`UpdateEmployee`] [`Command`].
///
/// [`UpdateEmployee`]: super::UpdateEmployee
#[derive(Clone, Debug)]
pub struct CreateEmployee {
    /// [`employee::Number`] of a new [`Employee`].
    pub number: employee::Number,

    /// First [`employee::Name`] of a new [`Employee`].
    pub first_name: employee::Name,

    /// Last [`employee::Name`] of a new [`Employee`].
    pub last_name: employee::Name,

    /// [`Email`] of a new [`Employee`].
    pub email: Email,

    /// [`employee::Phone`] of a new [`Employee`].
    pub phone: Option<employee::Phone>,

    /// [`department::Name`] of a new [`Employee`].
    pub department: department::Name,

    /// [`employee::Position`] of a new [`Employee`].
    pub position: Option<employee::Position>,

    /// [`employee::Manager`] of a new [`Employee`].
    pub manager: Option<employee::Manager>,

    /// Hire [`Date`] of a new [`Employee`].
    pub hire_date: Option<Date>,

    /// Salary of a new [`Employee`].
    pub salary: Option<Amount>,

    /// [`employee::Status`] of a new [`Employee`].
    pub status: employee::Status,
}

impl CreateEmployee {
    /// Builds an [`Employee`] with the provided [`employee::Id`] and
    /// [`DateTime`]s out of this [`CreateEmployee`].
    pub(crate) fn into_employee(
        self,
        id: employee::Id,
        created_at: employee::CreationDateTime,
        updated_at: employee::UpdateDateTime,
    ) -> Employee {
        let Self {
            number,
            first_name,
            last_name,
            email,
            phone,
            department,
            position,
            manager,
            hire_date,
            salary,
            status,
        } = self;

        Employee {
            id,
            number,
            first_name,
            last_name,
            email,
            phone,
            department,
            position,
            manager,
            hire_date,
            salary,
            status,
            created_at,
            updated_at,
        }
    }
}

impl<Db> Command<CreateEmployee> for Service<Db>
where
    Db: Database<Insert<Employee>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Employee;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateEmployee,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let now = DateTime::now();
        let employee =
            cmd.into_employee(employee::Id::new(), now.coerce(), now.coerce());

        self.database()
            .execute(Insert(employee.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(employee)
    }
}

/// Error of [`CreateEmployee`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
pub(crate) mod spec {
    use crate::{
        command::{fixture, Command as _},
        domain::employee,
        query::employee as query,
        Query as _,
    };

    use super::CreateEmployee;

    /// Returns a valid [`CreateEmployee`] [`Command`] for the provided
    /// [`employee::Number`].
    pub(crate) fn command(number: &str) -> CreateEmployee {
        CreateEmployee {
            number: number.parse().unwrap(),
            first_name: "Jane".parse().unwrap(),
            last_name: "Doe".parse().unwrap(),
            email: format!("{}@example.com", number.to_lowercase())
                .parse()
                .unwrap(),
            phone: None,
            department: "Engineering".parse().unwrap(),
            position: Some("Developer".parse().unwrap()),
            manager: Some("MGR-1".parse().unwrap()),
            hire_date: Some("2023-01-16".parse().unwrap()),
            salary: Some("4200.50".parse().unwrap()),
            status: employee::Status::default(),
        }
    }

    #[tokio::test]
    async fn stamps_and_stores_employee() {
        let svc = fixture::service();

        let created = svc.execute(command("EMP-001")).await.unwrap();

        assert_eq!(created.status, employee::Status::Active);
        assert_eq!(
            created.created_at.coerce::<()>(),
            created.updated_at.coerce::<()>(),
        );
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.number.to_string(), "EMP-001");
    }

    #[tokio::test]
    async fn rejects_duplicate_number() {
        let svc = fixture::service();
        drop(svc.execute(command("EMP-001")).await.unwrap());

        let mut dup = command("EMP-001");
        dup.email = "other@example.com".parse().unwrap();
        let err = svc.execute(dup).await.unwrap_err();

        assert!(err.to_string().contains("employees_employee_id_key"));
    }

    #[tokio::test]
    async fn checks_existence_by_email() {
        let svc = fixture::service();
        let created = svc.execute(command("EMP-001")).await.unwrap();

        let exists = svc
            .execute(query::ExistsByEmail::by(created.email))
            .await
            .unwrap();
        let missing = svc
            .execute(query::ExistsByEmail::by(
                "nobody@example.com".parse().unwrap(),
            ))
            .await
            .unwrap();

        assert!(exists.get());
        assert!(!missing.get());
    }
}
