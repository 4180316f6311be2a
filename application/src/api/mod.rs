//! REST API definitions.

pub mod attendance;
pub mod auth;
pub mod department;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod performance;
pub mod recruitment;

use std::str::FromStr;

use axum::{extract::rejection::JsonRejection, Json, Router};

use crate::{AsError as _, Error};

/// Builds the [`Router`] serving the whole REST API.
///
/// [`Service`] is expected to be provided as an [`Extension`] layer.
///
/// [`Extension`]: axum::Extension
/// [`Service`]: crate::Service
pub fn router() -> Router {
    Router::new()
        .merge(auth::router())
        .merge(employee::router())
        .merge(leave::router())
        .merge(payroll::router())
        .merge(recruitment::router())
        .merge(performance::router())
        .merge(attendance::router())
        .merge(department::router())
}

/// Unwraps a JSON request body, converting its rejection into an [`Error`].
fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Error> {
    body.map(|Json(v)| v).map_err(|e| e.into_error())
}

/// Parses an ID from a path segment.
///
/// Malformed IDs cannot identify anything, so they're reported as
/// [`Error::not_found()`].
fn id<T: FromStr>(raw: &str) -> Result<T, Error> {
    raw.parse().map_err(|_| Error::not_found())
}

/// Parses a filter value from a path segment.
///
/// [`None`] means the value cannot match anything.
fn filter<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}
