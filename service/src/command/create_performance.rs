//! [`Command`] for recording a new [`Performance`] review.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{employee, performance, Performance},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording a new [`Performance`] review.
///
/// Also describes the full state of a [`Performance`] review for the
/// [`UpdatePerformance`] [`Command`].
///
/// [`UpdatePerformance`]: super::UpdatePerformance
#[derive(Clone, Debug)]
pub struct CreatePerformance {
    /// [`employee::Number`] of the reviewed [`Employee`].
    ///
    /// [`Employee`]: crate::domain::Employee
    pub employee_id: employee::Number,

    /// [`performance::ReviewPeriod`] of a new [`Performance`] review.
    pub review_period: performance::ReviewPeriod,

    /// [`performance::Rating`] of a new [`Performance`] review.
    pub rating: performance::Rating,

    /// Comments of a new [`Performance`] review.
    pub comments: Option<String>,
}

impl CreatePerformance {
    /// Builds a [`Performance`] review with the provided
    /// [`performance::Id`] out of this [`CreatePerformance`].
    pub(crate) fn into_performance(self, id: performance::Id) -> Performance {
        let Self {
            employee_id,
            review_period,
            rating,
            comments,
        } = self;

        Performance {
            id,
            employee_id,
            review_period,
            rating,
            comments,
        }
    }
}

impl<Db> Command<CreatePerformance> for Service<Db>
where
    Db: Database<Insert<Performance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Performance;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePerformance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let review = cmd.into_performance(performance::Id::new());

        self.database()
            .execute(Insert(review.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(review)
    }
}

/// Error of [`CreatePerformance`] [`Command`] execution.
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
        query::performances,
        Query as _,
    };

    use super::CreatePerformance;

    /// Returns a valid [`CreatePerformance`] [`Command`] for the provided
    /// employee number.
    pub(crate) fn command(employee_id: &str) -> CreatePerformance {
        CreatePerformance {
            employee_id: employee_id.parse().unwrap(),
            review_period: "2024-Q1".parse().unwrap(),
            rating: "EXCELLENT".parse().unwrap(),
            comments: None,
        }
    }

    #[tokio::test]
    async fn lists_reviews_of_employee() {
        let svc = fixture::service();
        let review = svc.execute(command("EMP-001")).await.unwrap();
        drop(svc.execute(command("EMP-002")).await.unwrap());

        let found = svc
            .execute(performances::ByEmployee::by(review.employee_id.clone()))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, review.id);
        assert_eq!(found[0].rating.to_string(), "EXCELLENT");
    }
}
