//! [`Command`] for updating an existing [`Performance`] review.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{performance, Performance},
    infra::{database, Database},
    read, Service,
};

use super::{Command, CreatePerformance};

/// [`Command`] for updating an existing [`Performance`] review.
#[derive(Clone, Debug)]
pub struct UpdatePerformance {
    /// ID of the [`Performance`] review to update.
    pub id: performance::Id,

    /// New state of the [`Performance`] review.
    pub review: CreatePerformance,
}

impl<Db> Command<UpdatePerformance> for Service<Db>
where
    Db: Database<
            Select<By<read::Exists<Performance>, performance::Id>>,
            Ok = read::Exists<Performance>,
            Err = Traced<database::Error>,
        > + Database<Update<Performance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Performance;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePerformance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePerformance { id, review } = cmd;

        let exists = self
            .database()
            .execute(Select(By::<read::Exists<Performance>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !exists.get() {
            return Err(tracerr::new!(E::PerformanceNotExists(id)));
        }

        let review = review.into_performance(id);
        self.database()
            .execute(Update(review.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(review)
    }
}

/// Error of [`UpdatePerformance`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Performance`] review doesn't exist.
    #[display("`Performance(id: {_0})` does not exist")]
    #[from(ignore)]
    PerformanceNotExists(#[error(not(source))] performance::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_performance, fixture, Command as _},
        domain::performance,
        query::performance as query,
        Query as _,
    };

    use super::{ExecutionError, UpdatePerformance};

    #[tokio::test]
    async fn replaces_review() {
        let svc = fixture::service();
        let created = svc
            .execute(create_performance::spec::command("EMP-001"))
            .await
            .unwrap();

        let mut changes = create_performance::spec::command("EMP-001");
        changes.rating = "GOOD".parse().unwrap();
        changes.comments = Some("Solid quarter".into());
        drop(
            svc.execute(UpdatePerformance {
                id: created.id,
                review: changes,
            })
            .await
            .unwrap(),
        );

        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.rating.to_string(), "GOOD");
        assert_eq!(stored.comments.as_deref(), Some("Solid quarter"));
    }

    #[tokio::test]
    async fn fails_on_unknown_review() {
        let svc = fixture::service();

        let err = svc
            .execute(UpdatePerformance {
                id: performance::Id::new(),
                review: create_performance::spec::command("EMP-001"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PerformanceNotExists(_),
        ));
        let all = svc
            .execute(crate::query::performances::All::by(()))
            .await
            .unwrap();
        assert!(all.is_empty());
    }
}
