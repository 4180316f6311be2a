//! Recruitment REST API definitions: [`JobPosting`]s and
//! [`JobApplication`]s.

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use common::{Amount, Date, DateTime};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, department, job_application, job_posting, user, Email},
    query, Query as _,
};

use crate::{api, AsError, Error, Service};

/// Builds the [`Router`] of recruitment endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/recruitment/jobs", get(list_jobs).post(create_job))
        .route(
            "/recruitment/jobs/:id",
            get(get_job).put(update_job).delete(delete_job),
        )
        .route("/recruitment/jobs/:id/applications", get(list_job_applications))
        .route("/recruitment/jobs/status/:status", get(list_jobs_by_status))
        .route(
            "/recruitment/jobs/department/:department",
            get(list_jobs_by_department),
        )
        .route("/recruitment/jobs/type/:employment_type", get(list_jobs_by_type))
        .route("/recruitment/jobs/poster/:poster", get(list_jobs_by_poster))
        .route(
            "/recruitment/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/recruitment/applications/:id",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
}

/// Open (or past) position advertised by the organization.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    /// ID of this [`JobPosting`].
    pub id: job_posting::Id,

    /// Title of this [`JobPosting`].
    pub title: job_posting::Title,

    /// Name of the department hiring for this [`JobPosting`].
    pub department: department::Name,

    /// Location of the advertised position.
    pub location: Option<job_posting::Location>,

    /// Type of employment offered.
    pub employment_type: job_posting::EmploymentType,

    /// Description of the position.
    pub description: Option<String>,

    /// Requirements to candidates.
    pub requirements: Option<String>,

    /// Skills expected from candidates.
    pub skills: Vec<String>,

    /// Experience level expected from candidates.
    pub experience_level: Option<job_posting::ExperienceLevel>,

    /// Lower bound of the offered salary.
    pub salary_min: Amount,

    /// Upper bound of the offered salary.
    pub salary_max: Amount,

    /// Offered benefits.
    pub benefits: Option<String>,

    /// Status of this [`JobPosting`].
    pub status: job_posting::Status,

    /// Last date applications are accepted at.
    pub application_deadline: Option<Date>,

    /// Who posted this [`JobPosting`].
    pub posted_by: Option<job_posting::Poster>,

    /// [`DateTime`] when this [`JobPosting`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`JobPosting`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::JobPosting> for JobPosting {
    fn from(posting: domain::JobPosting) -> Self {
        let domain::JobPosting {
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
        } = posting;

        Self {
            id,
            title,
            department,
            location,
            employment_type,
            description,
            requirements,
            skills,
            experience_level,
            salary_min: salary.min,
            salary_max: salary.max,
            benefits,
            status,
            application_deadline,
            posted_by,
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Editable state of a [`JobPosting`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingInput {
    /// Title of the [`JobPosting`].
    pub title: job_posting::Title,

    /// Name of the department hiring for the [`JobPosting`].
    pub department: department::Name,

    /// Location of the advertised position.
    #[serde(default)]
    pub location: Option<job_posting::Location>,

    /// Type of employment offered.
    pub employment_type: job_posting::EmploymentType,

    /// Description of the position.
    #[serde(default)]
    pub description: Option<String>,

    /// Requirements to candidates.
    #[serde(default)]
    pub requirements: Option<String>,

    /// Skills expected from candidates.
    #[serde(default)]
    pub skills: Vec<String>,

    /// Experience level expected from candidates.
    #[serde(default)]
    pub experience_level: Option<job_posting::ExperienceLevel>,

    /// Lower bound of the offered salary.
    #[serde(default)]
    pub salary_min: Amount,

    /// Upper bound of the offered salary.
    #[serde(default)]
    pub salary_max: Amount,

    /// Offered benefits.
    #[serde(default)]
    pub benefits: Option<String>,

    /// Status of the [`JobPosting`].
    #[serde(default)]
    pub status: job_posting::Status,

    /// Last date applications are accepted at.
    #[serde(default)]
    pub application_deadline: Option<Date>,

    /// Who posted the [`JobPosting`].
    #[serde(default)]
    pub posted_by: Option<job_posting::Poster>,
}

impl From<JobPostingInput> for command::CreateJobPosting {
    fn from(input: JobPostingInput) -> Self {
        let JobPostingInput {
            title,
            department,
            location,
            employment_type,
            description,
            requirements,
            skills,
            experience_level,
            salary_min,
            salary_max,
            benefits,
            status,
            application_deadline,
            posted_by,
        } = input;

        Self {
            title,
            department,
            location,
            employment_type,
            description,
            requirements,
            skills,
            experience_level,
            salary: job_posting::SalaryRange {
                min: salary_min,
                max: salary_max,
            },
            benefits,
            status,
            application_deadline,
            posted_by,
        }
    }
}

/// Application of a candidate to a [`JobPosting`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    /// ID of this [`JobApplication`].
    pub id: job_application::Id,

    /// ID of the [`JobPosting`] applied to.
    pub job_posting_id: job_posting::Id,

    /// ID of the applying user, if registered.
    pub user_id: Option<user::Id>,

    /// Name of the candidate.
    pub applicant_name: Option<job_application::ApplicantName>,

    /// Email of the candidate.
    pub email: Option<Email>,

    /// Cover letter of the candidate.
    pub cover_letter: Option<String>,

    /// Status of this [`JobApplication`].
    pub status: job_application::Status,

    /// [`DateTime`] when this [`JobApplication`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`JobApplication`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::JobApplication> for JobApplication {
    fn from(application: domain::JobApplication) -> Self {
        let domain::JobApplication {
            id,
            job_posting_id,
            user_id,
            applicant_name,
            email,
            cover_letter,
            status,
            created_at,
            updated_at,
        } = application;

        Self {
            id,
            job_posting_id,
            user_id,
            applicant_name,
            email,
            cover_letter,
            status,
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Editable state of a [`JobApplication`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationInput {
    /// ID of the [`JobPosting`] applied to.
    pub job_posting_id: job_posting::Id,

    /// ID of the applying user, if registered.
    #[serde(default)]
    pub user_id: Option<user::Id>,

    /// Name of the candidate.
    #[serde(default)]
    pub applicant_name: Option<job_application::ApplicantName>,

    /// Email of the candidate.
    #[serde(default)]
    pub email: Option<Email>,

    /// Cover letter of the candidate.
    #[serde(default)]
    pub cover_letter: Option<String>,

    /// Status of the [`JobApplication`].
    #[serde(default)]
    pub status: job_application::Status,
}

impl From<JobApplicationInput> for command::CreateJobApplication {
    fn from(input: JobApplicationInput) -> Self {
        let JobApplicationInput {
            job_posting_id,
            user_id,
            applicant_name,
            email,
            cover_letter,
            status,
        } = input;

        Self {
            job_posting_id,
            user_id,
            applicant_name,
            email,
            cover_letter,
            status,
        }
    }
}

/// Converts [`domain::JobPosting`]s into a response.
fn jobs(postings: Vec<domain::JobPosting>) -> Json<Vec<JobPosting>> {
    Json(postings.into_iter().map(Into::into).collect())
}

/// Converts [`domain::JobApplication`]s into a response.
fn applications(
    applications: Vec<domain::JobApplication>,
) -> Json<Vec<JobApplication>> {
    Json(applications.into_iter().map(Into::into).collect())
}

async fn list_jobs(
    Extension(svc): Extension<Service>,
) -> Result<Json<Vec<JobPosting>>, Error> {
    svc.execute(query::job_postings::All::by(()))
        .await
        .map(jobs)
        .map_err(AsError::into_error)
}

async fn get_job(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, Error> {
    svc.execute(query::job_posting::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|p| Json(p.into()))
        .ok_or_else(Error::not_found)
}

async fn list_jobs_by_status(
    Extension(svc): Extension<Service>,
    Path(status): Path<String>,
) -> Result<Json<Vec<JobPosting>>, Error> {
    let Some(status) = api::filter(&status) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::job_postings::ByStatus::by(status))
        .await
        .map(jobs)
        .map_err(AsError::into_error)
}

async fn list_jobs_by_department(
    Extension(svc): Extension<Service>,
    Path(department): Path<String>,
) -> Result<Json<Vec<JobPosting>>, Error> {
    let Some(department) = api::filter(&department) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::job_postings::ByDepartment::by(department))
        .await
        .map(jobs)
        .map_err(AsError::into_error)
}

async fn list_jobs_by_poster(
    Extension(svc): Extension<Service>,
    Path(poster): Path<String>,
) -> Result<Json<Vec<JobPosting>>, Error> {
    let Some(poster) = api::filter(&poster) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::job_postings::ByPoster::by(poster))
        .await
        .map(jobs)
        .map_err(AsError::into_error)
}

async fn list_jobs_by_type(
    Extension(svc): Extension<Service>,
    Path(employment_type): Path<String>,
) -> Result<Json<Vec<JobPosting>>, Error> {
    let Some(employment_type) = api::filter(&employment_type) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::job_postings::ByEmploymentType::by(employment_type))
        .await
        .map(jobs)
        .map_err(AsError::into_error)
}

async fn list_job_applications(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Vec<JobApplication>>, Error> {
    let Some(id) = api::filter(&id) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::job_applications::ByJobPosting::by(id))
        .await
        .map(applications)
        .map_err(AsError::into_error)
}

async fn create_job(
    Extension(svc): Extension<Service>,
    body: Result<Json<JobPostingInput>, JsonRejection>,
) -> Result<Json<JobPosting>, Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreateJobPosting::from(input))
        .await
        .map(|p| Json(p.into()))
        .map_err(AsError::into_error)
}

async fn update_job(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<JobPostingInput>, JsonRejection>,
) -> Result<Json<JobPosting>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdateJobPosting {
        id,
        posting: input.into(),
    })
    .await
    .map(|p| Json(p.into()))
    .map_err(AsError::into_error)
}

async fn delete_job(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeleteJobPosting::by(api::id(&id)?))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

async fn list_applications(
    Extension(svc): Extension<Service>,
) -> Result<Json<Vec<JobApplication>>, Error> {
    svc.execute(query::job_applications::All::by(()))
        .await
        .map(applications)
        .map_err(AsError::into_error)
}

async fn get_application(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<JobApplication>, Error> {
    svc.execute(query::job_application::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|a| Json(a.into()))
        .ok_or_else(Error::not_found)
}

async fn create_application(
    Extension(svc): Extension<Service>,
    body: Result<Json<JobApplicationInput>, JsonRejection>,
) -> Result<Json<JobApplication>, Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreateJobApplication::from(input))
        .await
        .map(|a| Json(a.into()))
        .map_err(AsError::into_error)
}

async fn update_application(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<JobApplicationInput>, JsonRejection>,
) -> Result<Json<JobApplication>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdateJobApplication {
        id,
        application: input.into(),
    })
    .await
    .map(|a| Json(a.into()))
    .map_err(AsError::into_error)
}

async fn delete_application(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeleteJobApplication::by(api::id(&id)?))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::create_job_posting::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_job_posting::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JobPostingNotExists(_) => Some(Error::not_found()),
        }
    }
}

impl AsError for command::create_job_application::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_job_application::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JobApplicationNotExists(_) => Some(Error::not_found()),
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{
        command,
        domain::{job_application, job_posting},
    };

    use super::{JobApplicationInput, JobPostingInput};

    #[test]
    fn defaults_posting_to_active() {
        let input: JobPostingInput = serde_json::from_value(json!({
            "title": "Backend Engineer",
            "department": "Engineering",
            "employmentType": "FULL_TIME",
            "skills": ["Rust"],
            "salaryMin": 120_000,
            "salaryMax": 90_000,
        }))
        .unwrap();

        let cmd = command::CreateJobPosting::from(input);
        assert_eq!(cmd.status, job_posting::Status::Active);
        assert_eq!(cmd.skills, ["Rust"]);
        assert!(cmd.salary.min > cmd.salary.max);
        assert!(cmd.experience_level.is_none());
    }

    #[test]
    fn requires_job_posting_id_in_application() {
        let res = serde_json::from_value::<JobApplicationInput>(json!({
            "applicantName": "John Smith",
        }));

        assert!(res.is_err());
    }

    #[test]
    fn defaults_application_to_submitted() {
        let input: JobApplicationInput = serde_json::from_value(json!({
            "jobPostingId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        }))
        .unwrap();

        let cmd = command::CreateJobApplication::from(input);
        assert_eq!(cmd.status, job_application::Status::Submitted);
        assert!(cmd.email.is_none());
    }
}
