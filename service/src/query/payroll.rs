//! [`Query`] collection related to a single [`Payroll`].

use common::operations::By;

use crate::domain::{payroll, Payroll};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Payroll`] by its [`payroll::Id`].
pub type ById = DatabaseQuery<By<Option<Payroll>, payroll::Id>>;
