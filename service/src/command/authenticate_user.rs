//! [`Command`] for authenticating a [`User`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for authenticating a [`User`] by its credentials.
///
/// Issues the configured placeholder token on success.
#[derive(Clone, Debug)]
pub struct AuthenticateUser {
    /// [`user::Username`] of the [`User`].
    pub username: user::Username,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,
}

/// Successfully authenticated [`User`].
#[derive(Clone, Debug)]
pub struct Authenticated {
    /// Authenticated [`User`].
    pub user: User,

    /// Token issued to the [`User`].
    pub token: String,
}

impl<Db> Command<AuthenticateUser> for Service<Db>
where
    Db: Database<
        Select<By<Option<User>, user::Username>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Authenticated;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthenticateUser,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthenticateUser { username, password } = cmd;

        let user = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(username)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|u| u.password_hash.verify(password.expose_secret()))
            .ok_or(E::WrongCredentials)
            .map_err(tracerr::wrap!())?;

        Ok(Authenticated {
            user,
            token: self.config().placeholder_token.clone(),
        })
    }
}

/// Error of [`AuthenticateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Wrong [`user::Username`] or [`user::Password`].
    #[display("Invalid credentials")]
    WrongCredentials,
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::command::{fixture, register_user, Command as _};

    use super::{AuthenticateUser, ExecutionError};

    fn command(username: &str, password: &str) -> AuthenticateUser {
        AuthenticateUser {
            username: username.parse().unwrap(),
            password: SecretBox::new(Box::new(password.parse().unwrap())),
        }
    }

    #[tokio::test]
    async fn issues_placeholder_token() {
        let svc = fixture::service();
        let registered = svc
            .execute(register_user::spec::command("jdoe", "secret"))
            .await
            .unwrap();

        let auth = svc.execute(command("jdoe", "secret")).await.unwrap();

        assert_eq!(auth.user.id, registered.id);
        assert_eq!(auth.token, "mock-jwt-token");
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let svc = fixture::service();
        drop(
            svc.execute(register_user::spec::command("jdoe", "secret"))
                .await
                .unwrap(),
        );

        let err = svc.execute(command("jdoe", "wrong")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
        assert_eq!(err.as_ref().to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn rejects_unknown_user() {
        let svc = fixture::service();

        let err = svc.execute(command("ghost", "secret")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
    }
}
