//! [`Command`] for creating a new [`JobPosting`].

use common::{operations::Insert, Date, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{department, job_posting, JobPosting},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`JobPosting`].
///
/// Also describes the full state of a [`JobPosting`] for the
/// [`UpdateJobPosting`] [`Command`].
///
/// [`UpdateJobPosting`]: super::UpdateJobPosting
#[derive(Clone, Debug)]
pub struct CreateJobPosting {
    /// [`job_posting::Title`] of a new [`JobPosting`].
    pub title: job_posting::Title,

    /// [`department::Name`] of a new [`JobPosting`].
    pub department: department::Name,

    /// [`job_posting::Location`] of a new [`JobPosting`].
    pub location: Option<job_posting::Location>,

    /// [`job_posting::EmploymentType`] of a new [`JobPosting`].
    pub employment_type: job_posting::EmploymentType,

    /// Description of a new [`JobPosting`].
    pub description: Option<String>,

    /// Requirements of a new [`JobPosting`].
    pub requirements: Option<String>,

    /// Skills expected by a new [`JobPosting`].
    pub skills: Vec<String>,

    /// [`job_posting::ExperienceLevel`] expected by a new [`JobPosting`].
    pub experience_level: Option<job_posting::ExperienceLevel>,

    /// [`job_posting::SalaryRange`] of a new [`JobPosting`].
    pub salary: job_posting::SalaryRange,

    /// Benefits of a new [`JobPosting`].
    pub benefits: Option<String>,

    /// [`job_posting::Status`] of a new [`JobPosting`].
    pub status: job_posting::Status,

    /// Application deadline of a new [`JobPosting`].
    pub application_deadline: Option<Date>,

    /// [`job_posting::Poster`] of a new [`JobPosting`].
    pub posted_by: Option<job_posting::Poster>,
}

impl CreateJobPosting {
    /// Builds a [`JobPosting`] with the provided [`job_posting::Id`] and
    /// [`DateTime`]s out of this [`CreateJobPosting`].
    pub(crate) fn into_job_posting(
        self,
        id: job_posting::Id,
        created_at: job_posting::CreationDateTime,
        updated_at: job_posting::UpdateDateTime,
    ) -> JobPosting {
        let Self {
            title,
            department,
            location,
            employment_type,
            description,
            requirements,
            skills,
            experience_level,
            salary,
            benefits,
            status,
            application_deadline,
            posted_by,
        } = self;

        JobPosting {
            id,
            title,
            department,
            location,
            employment_type,
            description,
            requirements,
            skills,
            experience_level,
            salary,
            benefits,
            status,
            application_deadline,
            posted_by,
            created_at,
            updated_at,
        }
    }
}

impl<Db> Command<CreateJobPosting> for Service<Db>
where
    Db: Database<Insert<JobPosting>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = JobPosting;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateJobPosting,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let now = DateTime::now();
        let posting = cmd.into_job_posting(
            job_posting::Id::new(),
            now.coerce(),
            now.coerce(),
        );

        self.database()
            .execute(Insert(posting.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(posting)
    }
}

/// Error of [`CreateJobPosting`] [`Command`] execution.
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
        domain::job_posting,
        query::job_postings,
        Query as _,
    };

    use super::CreateJobPosting;

    /// Returns a valid [`CreateJobPosting`] [`Command`] with the provided
    /// title.
    pub(crate) fn command(title: &str) -> CreateJobPosting {
        CreateJobPosting {
            title: title.parse().unwrap(),
            department: "Engineering".parse().unwrap(),
            location: Some("Remote".parse().unwrap()),
            employment_type: job_posting::EmploymentType::FullTime,
            description: Some("Build things".into()),
            requirements: None,
            skills: vec!["Rust".into(), "SQL".into()],
            experience_level: Some(job_posting::ExperienceLevel::Senior),
            salary: job_posting::SalaryRange {
                min: "90000".parse().unwrap(),
                max: "120000".parse().unwrap(),
            },
            benefits: None,
            status: job_posting::Status::default(),
            application_deadline: None,
            posted_by: None,
        }
    }

    #[tokio::test]
    async fn defaults_to_active() {
        let svc = fixture::service();

        let created = svc.execute(command("Backend Engineer")).await.unwrap();

        assert_eq!(created.status, job_posting::Status::Active);
        assert_eq!(created.skills, ["Rust", "SQL"]);
    }

    #[tokio::test]
    async fn filters_by_status_in_insertion_order() {
        let svc = fixture::service();
        let first = svc.execute(command("Backend Engineer")).await.unwrap();
        let mut closed = command("Designer");
        closed.status = job_posting::Status::Closed;
        drop(svc.execute(closed).await.unwrap());
        let second = svc.execute(command("Data Engineer")).await.unwrap();

        let active = svc
            .execute(job_postings::ByStatus::by(job_posting::Status::Active))
            .await
            .unwrap();

        let ids = active.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids, [first.id, second.id]);
    }

    #[tokio::test]
    async fn finds_by_poster() {
        let svc = fixture::service();
        let mut posted = command("Backend Engineer");
        posted.posted_by = Some("recruiter1".parse().unwrap());
        let posted = svc.execute(posted).await.unwrap();
        drop(svc.execute(command("Designer")).await.unwrap());

        let found = svc
            .execute(job_postings::ByPoster::by("recruiter1".parse().unwrap()))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, posted.id);
    }
}
