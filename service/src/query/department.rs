//! [`Query`] collection related to a single [`Department`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{department, employee, Department, Employee},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries a [`Department`] by its [`department::Id`].
pub type ById = DatabaseQuery<By<Option<Department>, department::Id>>;

/// Queries a [`Department`] by its [`department::Code`].
pub type ByCode = DatabaseQuery<By<Option<Department>, department::Code>>;

/// [`Query`] calculating [`department::Stats`] of a [`Department`].
///
/// Only active [`Employee`]s are counted. Returns [`None`] if the
/// [`Department`] doesn't exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stats {
    /// ID of the [`Department`].
    pub id: department::Id,
}

impl<Db> Query<Stats> for Service<Db>
where
    Db: Database<
            Select<By<Option<Department>, department::Id>>,
            Ok = Option<Department>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Employee>, department::Name>>,
            Ok = Vec<Employee>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<department::Stats>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Stats { id }: Stats,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(department) = self
            .database()
            .execute(Select(By::<Option<Department>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        else {
            return Ok(None);
        };

        let salaries = self
            .database()
            .execute(Select(By::<Vec<Employee>, _>::new(department.name)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .filter(|e| e.status == employee::Status::Active)
            .map(|e| e.salary)
            .collect::<Vec<_>>();

        department::Stats::of(&salaries)
            .map(Some)
            .ok_or(E::SalaryOverflow)
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`Stats`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Salaries of the [`Department`] are too large to be totaled.
    #[display("Department salaries are too large to be totaled")]
    SalaryOverflow,
}

#[cfg(test)]
mod spec {
    use common::Amount;

    use crate::{
        command::{
            create_department, create_employee, fixture, Command as _,
            UpdateEmployee,
        },
        domain::{department, employee},
        Query as _,
    };

    use super::Stats;

    #[tokio::test]
    async fn counts_active_employees_of_department() {
        let svc = fixture::service();
        let created = svc
            .execute(create_department::spec::command("Engineering", "ENG"))
            .await
            .unwrap();
        let mut hired = Vec::new();
        for (number, salary) in
            [("EMP-001", "3000"), ("EMP-002", "5000"), ("EMP-003", "5000")]
        {
            let mut cmd = create_employee::spec::command(number);
            cmd.salary = Some(salary.parse().unwrap());
            hired.push(svc.execute(cmd).await.unwrap());
        }
        let mut other = create_employee::spec::command("EMP-004");
        other.department = "Sales".parse().unwrap();
        drop(svc.execute(other).await.unwrap());

        let mut changes = create_employee::spec::command("EMP-003");
        changes.status = employee::Status::Terminated;
        drop(
            svc.execute(UpdateEmployee {
                id: hired[2].id,
                employee: changes,
            })
            .await
            .unwrap(),
        );

        let stats = svc
            .execute(Stats { id: created.id })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stats.total_employees, 2);
        assert_eq!(
            stats.total_salary_budget,
            "8000".parse::<Amount>().unwrap(),
        );
        assert_eq!(stats.average_salary, "4000".parse::<Amount>().unwrap());
    }

    #[tokio::test]
    async fn returns_nothing_for_unknown_department() {
        let svc = fixture::service();

        let stats = svc
            .execute(Stats {
                id: department::Id::new(),
            })
            .await
            .unwrap();

        assert!(stats.is_none());
    }
}
