//! [`Query`] collection related to the multiple [`Performance`] reviews.

use common::operations::By;

#[cfg(doc)]
use crate::domain::Employee;
use crate::domain::{employee, Performance};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Performance`] reviews.
pub type All = DatabaseQuery<By<Vec<Performance>, ()>>;

/// Queries [`Performance`] reviews of the [`Employee`] with the provided
/// [`employee::Number`].
pub type ByEmployee = DatabaseQuery<By<Vec<Performance>, employee::Number>>;
