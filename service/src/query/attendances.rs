//! [`Query`] collection related to the multiple [`Attendance`]s.

use common::{operations::By, Date};

#[cfg(doc)]
use crate::domain::Employee;
use crate::domain::{attendance, employee, Attendance};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Attendance`]s.
pub type All = DatabaseQuery<By<Vec<Attendance>, ()>>;

/// Queries [`Attendance`]s of the [`Employee`] with the provided
/// [`employee::Number`].
pub type ByEmployee = DatabaseQuery<By<Vec<Attendance>, employee::Number>>;

/// Queries [`Attendance`]s of the provided [`Date`].
pub type ByDate = DatabaseQuery<By<Vec<Attendance>, Date>>;

/// Queries [`Attendance`]s having the provided [`attendance::Status`].
pub type ByStatus = DatabaseQuery<By<Vec<Attendance>, attendance::Status>>;
