//! [`Query`] collection related to a single [`Employee`].

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{
    domain::{employee, Email, Employee},
    read,
};

use super::DatabaseQuery;

/// Queries an [`Employee`] by its [`employee::Id`].
pub type ById = DatabaseQuery<By<Option<Employee>, employee::Id>>;

/// Queries an [`Employee`] by its [`employee::Number`].
pub type ByNumber = DatabaseQuery<By<Option<Employee>, employee::Number>>;

/// Queries an [`Employee`] by its [`Email`].
pub type ByEmail = DatabaseQuery<By<Option<Employee>, Email>>;

/// Queries whether an [`Employee`] with the provided [`employee::Number`]
/// exists.
pub type ExistsByNumber =
    DatabaseQuery<By<read::Exists<Employee>, employee::Number>>;

/// Queries whether an [`Employee`] with the provided [`Email`] exists.
pub type ExistsByEmail = DatabaseQuery<By<read::Exists<Employee>, Email>>;
