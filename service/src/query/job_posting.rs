//! [`Query`] collection related to a single [`JobPosting`].

use common::operations::By;

use crate::domain::{job_posting, JobPosting};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`JobPosting`] by its [`job_posting::Id`].
pub type ById = DatabaseQuery<By<Option<JobPosting>, job_posting::Id>>;
