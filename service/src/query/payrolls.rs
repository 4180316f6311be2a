//! [`Query`] collection related to the multiple [`Payroll`]s.

use common::operations::By;

#[cfg(doc)]
use crate::domain::Employee;
use crate::domain::{employee, payroll, Payroll};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Payroll`]s.
pub type All = DatabaseQuery<By<Vec<Payroll>, ()>>;

/// Queries [`Payroll`]s of the [`Employee`] with the provided
/// [`employee::Number`].
pub type ByEmployee = DatabaseQuery<By<Vec<Payroll>, employee::Number>>;

/// Queries [`Payroll`]s having the provided [`payroll::Status`].
pub type ByStatus = DatabaseQuery<By<Vec<Payroll>, payroll::Status>>;

/// Queries [`Payroll`]s covering exactly the provided [`payroll::Period`].
pub type ByPeriod = DatabaseQuery<By<Vec<Payroll>, payroll::Period>>;

/// Queries [`Payroll`]s paid within the provided [`payroll::PayDateRange`].
pub type ByPayDate = DatabaseQuery<By<Vec<Payroll>, payroll::PayDateRange>>;
