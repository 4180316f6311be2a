//! [`Query`] collection related to the multiple [`JobApplication`]s.

use common::operations::By;

#[cfg(doc)]
use crate::domain::JobPosting;
use crate::domain::{job_posting, JobApplication};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`JobApplication`]s.
pub type All = DatabaseQuery<By<Vec<JobApplication>, ()>>;

/// Queries [`JobApplication`]s to the [`JobPosting`] with the provided
/// [`job_posting::Id`].
pub type ByJobPosting =
    DatabaseQuery<By<Vec<JobApplication>, job_posting::Id>>;
