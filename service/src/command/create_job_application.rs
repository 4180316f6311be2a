//! [`Command`] for submitting a new [`JobApplication`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{job_application, job_posting, user, Email, JobApplication},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting a new [`JobApplication`].
///
/// The referenced [`JobPosting`] and [`User`] are not checked to exist.
///
/// Also describes the full state of a [`JobApplication`] for the
/// [`UpdateJobApplication`] [`Command`].
///
/// [`JobPosting`]: crate::domain::JobPosting
/// [`UpdateJobApplication`]: super::UpdateJobApplication
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct CreateJobApplication {
    /// [`job_posting::Id`] of the [`JobPosting`] being applied to.
    ///
    /// [`JobPosting`]: crate::domain::JobPosting
    pub job_posting_id: job_posting::Id,

    /// [`user::Id`] of the applying [`User`], if registered.
    ///
    /// [`User`]: crate::domain::User
    pub user_id: Option<user::Id>,

    /// [`job_application::ApplicantName`] of the candidate.
    pub applicant_name: Option<job_application::ApplicantName>,

    /// [`Email`] of the candidate.
    pub email: Option<Email>,

    /// Cover letter of the candidate.
    pub cover_letter: Option<String>,

    /// [`job_application::Status`] of a new [`JobApplication`].
    pub status: job_application::Status,
}

impl CreateJobApplication {
    /// Builds a [`JobApplication`] with the provided [`job_application::Id`]
    /// and [`DateTime`]s out of this [`CreateJobApplication`].
    pub(crate) fn into_job_application(
        self,
        id: job_application::Id,
        created_at: job_application::CreationDateTime,
        updated_at: job_application::UpdateDateTime,
    ) -> JobApplication {
        let Self {
            job_posting_id,
            user_id,
            applicant_name,
            email,
            cover_letter,
            status,
        } = self;

        JobApplication {
            id,
            job_posting_id,
            user_id,
            applicant_name,
            email,
            cover_letter,
            status,
            created_at,
            updated_at,
        }
    }
}

impl<Db> Command<CreateJobApplication> for Service<Db>
where
    Db: Database<
        Insert<JobApplication>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = JobApplication;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateJobApplication,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let now = DateTime::now();
        let application = cmd.into_job_application(
            job_application::Id::new(),
            now.coerce(),
            now.coerce(),
        );

        self.database()
            .execute(Insert(application.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(application)
    }
}

/// Error of [`CreateJobApplication`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
