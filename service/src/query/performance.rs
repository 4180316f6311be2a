//! [`Query`] collection related to a single [`Performance`] review.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{
    domain::{performance, Performance},
    read,
};

use super::DatabaseQuery;

/// Queries a [`Performance`] review by its [`performance::Id`].
pub type ById = DatabaseQuery<By<Option<Performance>, performance::Id>>;

/// Queries whether a [`Performance`] review with the provided
/// [`performance::Id`] exists.
pub type ExistsById =
    DatabaseQuery<By<read::Exists<Performance>, performance::Id>>;
