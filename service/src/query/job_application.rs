//! [`Query`] collection related to a single [`JobApplication`].

use common::operations::By;

use crate::domain::{job_application, JobApplication};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`JobApplication`] by its [`job_application::Id`].
pub type ById =
    DatabaseQuery<By<Option<JobApplication>, job_application::Id>>;
