//! [`Query`] collection related to the multiple [`Employee`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::domain::{department, employee, Employee};

use super::DatabaseQuery;

/// Queries all the [`Employee`]s.
pub type All = DatabaseQuery<By<Vec<Employee>, ()>>;

/// Queries [`Employee`]s working in the department with the provided
/// [`department::Name`].
pub type ByDepartment =
    DatabaseQuery<By<Vec<Employee>, department::Name>>;

/// Queries [`Employee`]s having the provided [`employee::Status`].
pub type ByStatus = DatabaseQuery<By<Vec<Employee>, employee::Status>>;

/// Queries [`Employee`]s managed by the provided [`employee::Manager`].
pub type ByManager = DatabaseQuery<By<Vec<Employee>, employee::Manager>>;
