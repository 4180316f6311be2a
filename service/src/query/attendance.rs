//! [`Query`] collection related to a single [`Attendance`].

use common::operations::By;

use crate::domain::{attendance, Attendance};
#[cfg(doc)]
use crate::{domain::Employee, Query};

use super::DatabaseQuery;

/// Queries an [`Attendance`] by its [`attendance::Id`].
pub type ById = DatabaseQuery<By<Option<Attendance>, attendance::Id>>;

/// Queries the [`Attendance`] of an [`Employee`] on the provided
/// [`attendance::Day`].
pub type ByDay = DatabaseQuery<By<Option<Attendance>, attendance::Day>>;
