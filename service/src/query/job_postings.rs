//! [`Query`] collection related to the multiple [`JobPosting`]s.

use common::operations::By;

use crate::domain::{department, job_posting, JobPosting};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`JobPosting`]s.
pub type All = DatabaseQuery<By<Vec<JobPosting>, ()>>;

/// Queries [`JobPosting`]s having the provided [`job_posting::Status`].
pub type ByStatus = DatabaseQuery<By<Vec<JobPosting>, job_posting::Status>>;

/// Queries [`JobPosting`]s of the department with the provided
/// [`department::Name`].
pub type ByDepartment =
    DatabaseQuery<By<Vec<JobPosting>, department::Name>>;

/// Queries [`JobPosting`]s offering the provided
/// [`job_posting::EmploymentType`].
pub type ByEmploymentType =
    DatabaseQuery<By<Vec<JobPosting>, job_posting::EmploymentType>>;

/// Queries [`JobPosting`]s published by the provided [`job_posting::Poster`].
pub type ByPoster = DatabaseQuery<By<Vec<JobPosting>, job_posting::Poster>>;
