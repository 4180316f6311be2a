//! [`Command`] for updating an existing [`JobApplication`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{job_application, JobApplication},
    infra::{database, Database},
    Service,
};

use super::{Command, CreateJobApplication};

/// [`Command`] for updating an existing [`JobApplication`].
///
/// Replaces all the editable fields, keeping the creation time.
#[derive(Clone, Debug)]
pub struct UpdateJobApplication {
    /// ID of the [`JobApplication`] to update.
    pub id: job_application::Id,

    /// New state of the [`JobApplication`].
    pub application: CreateJobApplication,
}

impl<Db> Command<UpdateJobApplication> for Service<Db>
where
    Db: Database<
            Select<By<Option<JobApplication>, job_application::Id>>,
            Ok = Option<JobApplication>,
            Err = Traced<database::Error>,
        > + Database<
            Update<JobApplication>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = JobApplication;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateJobApplication,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateJobApplication { id, application } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<JobApplication>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::JobApplicationNotExists(id))
            .map_err(tracerr::wrap!())?;

        let application = application.into_job_application(
            id,
            existing.created_at,
            DateTime::now().coerce(),
        );
        self.database()
            .execute(Update(application.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(application)
    }
}

/// Error of [`UpdateJobApplication`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`JobApplication`] doesn't exist.
    #[display("`JobApplication(id: {_0})` does not exist")]
    #[from(ignore)]
    JobApplicationNotExists(#[error(not(source))] job_application::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_job_application, fixture, Command as _},
        domain::{job_application, job_posting},
        query::job_application as query,
        Query as _,
    };

    use super::{ExecutionError, UpdateJobApplication};

    #[tokio::test]
    async fn moves_application_through_review() {
        let svc = fixture::service();
        let posting = job_posting::Id::new();
        let created = svc
            .execute(create_job_application::spec::command(posting))
            .await
            .unwrap();

        let mut changes = create_job_application::spec::command(posting);
        changes.status = job_application::Status::Accepted;
        drop(
            svc.execute(UpdateJobApplication {
                id: created.id,
                application: changes,
            })
            .await
            .unwrap(),
        );

        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, job_application::Status::Accepted);
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn fails_on_unknown_application() {
        let svc = fixture::service();

        let err = svc
            .execute(UpdateJobApplication {
                id: job_application::Id::new(),
                application: create_job_application::spec::command(
                    job_posting::Id::new(),
                ),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::JobApplicationNotExists(_),
        ));
    }
}
