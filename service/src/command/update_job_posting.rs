//! [`Command`] for updating an existing [`JobPosting`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{job_posting, JobPosting},
    infra::{database, Database},
    Service,
};

use super::{Command, CreateJobPosting};

/// [`Command`] for updating an existing [`JobPosting`].
///
/// Replaces all the editable fields, keeping the creation time.
#[derive(Clone, Debug)]
pub struct UpdateJobPosting {
    /// ID of the [`JobPosting`] to update.
    pub id: job_posting::Id,

    /// New state of the [`JobPosting`].
    pub posting: CreateJobPosting,
}

impl<Db> Command<UpdateJobPosting> for Service<Db>
where
    Db: Database<
            Select<By<Option<JobPosting>, job_posting::Id>>,
            Ok = Option<JobPosting>,
            Err = Traced<database::Error>,
        > + Database<Update<JobPosting>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = JobPosting;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateJobPosting,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateJobPosting { id, posting } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<JobPosting>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::JobPostingNotExists(id))
            .map_err(tracerr::wrap!())?;

        let posting = posting.into_job_posting(
            id,
            existing.created_at,
            DateTime::now().coerce(),
        );
        self.database()
            .execute(Update(posting.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(posting)
    }
}

/// Error of [`UpdateJobPosting`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`JobPosting`] doesn't exist.
    #[display("`JobPosting(id: {_0})` does not exist")]
    #[from(ignore)]
    JobPostingNotExists(#[error(not(source))] job_posting::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_job_posting, fixture, Command as _},
        domain::job_posting,
    };

    use super::{ExecutionError, UpdateJobPosting};

    #[tokio::test]
    async fn closes_posting() {
        let svc = fixture::service();
        let created = svc
            .execute(create_job_posting::spec::command("Backend Engineer"))
            .await
            .unwrap();

        let mut changes = create_job_posting::spec::command("Backend Engineer");
        changes.status = job_posting::Status::Closed;
        changes.skills.clear();
        let updated = svc
            .execute(UpdateJobPosting {
                id: created.id,
                posting: changes,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, job_posting::Status::Closed);
        assert!(updated.skills.is_empty());
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn fails_on_unknown_posting() {
        let svc = fixture::service();

        let err = svc
            .execute(UpdateJobPosting {
                id: job_posting::Id::new(),
                posting: create_job_posting::spec::command("Designer"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::JobPostingNotExists(_),
        ));
    }
}
