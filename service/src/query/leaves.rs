//! [`Query`] collection related to the multiple [`Leave`]s.

use common::operations::By;

#[cfg(doc)]
use crate::domain::Employee;
use crate::domain::{employee, leave, Leave};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Leave`]s.
pub type All = DatabaseQuery<By<Vec<Leave>, ()>>;

/// Queries [`Leave`]s of the [`Employee`] with the provided
/// [`employee::Number`].
pub type ByEmployee = DatabaseQuery<By<Vec<Leave>, employee::Number>>;

/// Queries [`Leave`]s having the provided [`leave::Status`].
pub type ByStatus = DatabaseQuery<By<Vec<Leave>, leave::Status>>;

/// Queries [`Leave`]s of the provided [`leave::Kind`].
pub type ByKind = DatabaseQuery<By<Vec<Leave>, leave::Kind>>;

/// Queries [`Leave`]s decided by the provided [`leave::Approver`].
pub type ByApprover = DatabaseQuery<By<Vec<Leave>, leave::Approver>>;
