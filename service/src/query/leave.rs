//! [`Query`] collection related to a single [`Leave`].

use common::operations::By;

use crate::domain::{leave, Leave};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Leave`] by its [`leave::Id`].
pub type ById = DatabaseQuery<By<Option<Leave>, leave::Id>>;
