//! [`Query`] collection related to the multiple [`Department`]s.

use common::operations::By;

use crate::domain::{department, Department};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Department`]s, including the deleted ones.
pub type All = DatabaseQuery<By<Vec<Department>, ()>>;

/// Queries the [`Department`]s in use.
pub type Active = DatabaseQuery<By<Vec<Department>, department::Active>>;
