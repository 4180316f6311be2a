//! Authentication REST API definitions.
//!
//! Unlike other endpoints, failures are reported as `400 Bad Request` with a
//! `{success: false, message}` body.

use axum::{
    extract::rejection::JsonRejection, http::StatusCode, routing::post,
    Extension, Json, Router,
};
use common::DateTime;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, authenticate_user, register_user, Command as _},
    domain::{self, user, Email},
};
use tracerr::Traced;

use crate::{api, AsError, Error, Service};

/// Builds the [`Router`] of authentication endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

/// Account able to sign in into the system.
///
/// Never exposes the password hash.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    pub id: user::Id,

    /// Username of this [`User`].
    pub username: user::Username,

    /// Email of this [`User`].
    pub email: Email,

    /// Display name of this [`User`].
    pub name: Option<user::Name>,

    /// Role of this [`User`].
    pub role: user::Role,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`User`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        let domain::User {
            id,
            username,
            email,
            password_hash: _,
            name,
            role,
            created_at,
            updated_at,
        } = user;

        Self {
            id,
            username,
            email,
            name,
            role,
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Credentials of a [`User`] signing in.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginInput {
    /// Username of the [`User`].
    pub username: String,

    /// Password of the [`User`].
    pub password: String,
}

/// Account details of a [`User`] being registered.
#[derive(Clone, Debug, Deserialize)]
pub struct RegisterInput {
    /// Username of a new [`User`].
    pub username: user::Username,

    /// Email of a new [`User`].
    pub email: Email,

    /// Password of a new [`User`].
    pub password: String,

    /// Display name of a new [`User`].
    #[serde(default)]
    pub name: Option<user::Name>,

    /// Role of a new [`User`].
    #[serde(default)]
    pub role: user::Role,
}

/// Body of an authentication response.
#[derive(Clone, Debug, Serialize)]
pub struct Reply {
    /// Whether the operation succeeded.
    pub success: bool,

    /// [`User`] the operation succeeded for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Token issued on a successful sign in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Reason of a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Reply {
    /// Creates a successful [`Reply`].
    fn success(user: domain::User, token: Option<String>) -> Self {
        Self {
            success: true,
            user: Some(user.into()),
            token,
            message: None,
        }
    }

    /// Creates a failed [`Reply`] with the provided `message`.
    fn failure(message: impl ToString) -> (StatusCode, Json<Self>) {
        let reply = Self {
            success: false,
            user: None,
            token: None,
            message: Some(message.to_string()),
        };
        (StatusCode::BAD_REQUEST, Json(reply))
    }
}

/// Result of an authentication endpoint.
type Outcome = Result<(StatusCode, Json<Reply>), Error>;

async fn login(
    Extension(svc): Extension<Service>,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Outcome {
    let LoginInput { username, password } = api::payload(body)?;
    let (Ok(username), Ok(password)) = (
        username.parse::<user::Username>(),
        password.parse::<user::Password>(),
    ) else {
        return Ok(Reply::failure(
            authenticate_user::ExecutionError::WrongCredentials,
        ));
    };

    let res = svc
        .execute(command::AuthenticateUser {
            username,
            password: SecretBox::new(Box::new(password)),
        })
        .await;
    match res {
        Ok(command::Authenticated { user, token }) => {
            Ok((StatusCode::OK, Json(Reply::success(user, Some(token)))))
        }
        Err(e) => rejected(e),
    }
}

async fn register(
    Extension(svc): Extension<Service>,
    body: Result<Json<RegisterInput>, JsonRejection>,
) -> Outcome {
    let RegisterInput {
        username,
        email,
        password,
        name,
        role,
    } = api::payload(body)?;
    let password = match password.parse::<user::Password>() {
        Ok(p) => p,
        Err(msg) => return Ok(Reply::failure(msg)),
    };

    let res = svc
        .execute(command::RegisterUser {
            username,
            email,
            password: SecretBox::new(Box::new(password)),
            name,
            role,
        })
        .await;
    match res {
        Ok(user) => Ok((StatusCode::OK, Json(Reply::success(user, None)))),
        Err(e) => rejected(e),
    }
}

/// Converts a failed authentication [`Command`] into an [`Outcome`].
///
/// Validation failures become a failed [`Reply`], while everything else is
/// reported as an [`Error`].
///
/// [`Command`]: command::Command
fn rejected<E: Rejectable>(err: Traced<E>) -> Outcome {
    if err.as_ref().is_rejection() {
        Ok(Reply::failure(err.as_ref()))
    } else {
        Err(err.into_error())
    }
}

/// Error of an authentication [`Command`](command::Command), which may be a
/// mere rejection of the provided input.
trait Rejectable: AsError + std::fmt::Display {
    /// Indicates whether this error rejects the provided input.
    fn is_rejection(&self) -> bool;
}

impl Rejectable for authenticate_user::ExecutionError {
    fn is_rejection(&self) -> bool {
        matches!(self, Self::WrongCredentials)
    }
}

impl Rejectable for register_user::ExecutionError {
    fn is_rejection(&self) -> bool {
        matches!(self, Self::UsernameOccupied | Self::EmailOccupied)
    }
}

impl AsError for authenticate_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::WrongCredentials => None,
        }
    }
}

impl AsError for register_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UsernameOccupied | Self::EmailOccupied => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{command::register_user, domain::user};

    use super::{Reply, RegisterInput};

    #[test]
    fn failure_reply_has_message_only() {
        let (status, reply) =
            Reply::failure(register_user::ExecutionError::UsernameOccupied);

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&reply.0).unwrap(),
            json!({
                "success": false,
                "message": "Username already exists",
            }),
        );
    }

    #[test]
    fn registers_employees_by_default() {
        let input: RegisterInput = serde_json::from_value(json!({
            "username": "jdoe",
            "email": "jdoe@example.com",
            "password": "secret",
        }))
        .unwrap();

        assert_eq!(input.role, user::Role::Employee);
        assert!(input.name.is_none());
    }

    #[test]
    fn rejects_malformed_username() {
        let res = serde_json::from_value::<RegisterInput>(json!({
            "username": "john doe",
            "email": "jdoe@example.com",
            "password": "secret",
        }));

        assert!(res.is_err());
    }
}
