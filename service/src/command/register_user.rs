//! [`Command`] for registering a new [`User`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

use crate::{
    domain::{user, Email, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// Name of the unique constraint on [`User::username`].
const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Name of the unique constraint on [`User::email`].
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// [`Command`] for registering a new [`User`].
///
/// Nothing is stored if the [`user::Username`] or the [`Email`] is already
/// occupied.
#[derive(Clone, Debug)]
pub struct RegisterUser {
    /// [`user::Username`] of a new [`User`].
    pub username: user::Username,

    /// [`Email`] of a new [`User`].
    pub email: Email,

    /// [`user::Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// [`user::Name`] of a new [`User`].
    pub name: Option<user::Name>,

    /// [`user::Role`] of a new [`User`].
    pub role: user::Role,
}

impl<Db> Command<RegisterUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Username>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RegisterUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterUser {
            username,
            email,
            password,
            name,
            role,
        } = cmd;

        let u = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(username.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::UsernameOccupied));
        }

        let u = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(email.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::EmailOccupied));
        }

        let now = DateTime::now();
        let user = User {
            id: user::Id::new(),
            username,
            email,
            password_hash: user::PasswordHash::new(password.expose_secret()),
            name,
            role,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(user.clone()))
            .await
            .map_err(|e| {
                let e = e.into_inner();
                if e.is_unique_violation(Some(USERNAME_CONSTRAINT)) {
                    tracerr::new!(E::UsernameOccupied)
                } else if e.is_unique_violation(Some(EMAIL_CONSTRAINT)) {
                    tracerr::new!(E::EmailOccupied)
                } else {
                    tracerr::new!(E::Db(e))
                }
            })?;

        Ok(user)
    }
}

/// Error of [`RegisterUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Username`] is already occupied.
    #[display("Username already exists")]
    UsernameOccupied,

    /// [`Email`] is already occupied.
    #[display("Email already exists")]
    EmailOccupied,
}

#[cfg(test)]
pub(crate) mod spec {
    use common::operations::{By, Select};
    use secrecy::SecretBox;

    use crate::{
        command::{fixture, Command as _},
        domain::{user, Email, User},
        infra::Memory,
        Service,
    };

    use super::{ExecutionError, RegisterUser};

    /// Returns a valid [`RegisterUser`] [`Command`] for the provided
    /// username and password.
    pub(crate) fn command(username: &str, password: &str) -> RegisterUser {
        RegisterUser {
            username: username.parse().unwrap(),
            email: format!("{username}@example.com").parse().unwrap(),
            password: SecretBox::new(Box::new(password.parse().unwrap())),
            name: None,
            role: user::Role::default(),
        }
    }

    async fn stored(svc: &Service<Memory>, username: &str) -> Option<User> {
        let username: user::Username = username.parse().unwrap();
        svc.database()
            .execute(Select(By::<Option<User>, _>::new(username)))
            .await
            .unwrap()
    }

    async fn stored_by_email(svc: &Service<Memory>, email: &str) -> bool {
        let email: Email = email.parse().unwrap();
        svc.database()
            .execute(Select(By::<Option<User>, _>::new(email)))
            .await
            .unwrap()
            .is_some()
    }

    #[tokio::test]
    async fn registers_employee_by_default() {
        let svc = fixture::service();

        let user = svc.execute(command("jdoe", "secret")).await.unwrap();

        assert_eq!(user.role, user::Role::Employee);
        assert_eq!(user.username.to_string(), "jdoe");
        assert_eq!(stored(&svc, "jdoe").await.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn rejects_duplicate_username() {
        let svc = fixture::service();
        drop(svc.execute(command("jdoe", "secret")).await.unwrap());

        let mut dup = command("jdoe", "other");
        dup.email = "someone.else@example.com".parse().unwrap();
        let err = svc.execute(dup).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UsernameOccupied));
        assert_eq!(err.as_ref().to_string(), "Username already exists");
        assert!(!stored_by_email(&svc, "someone.else@example.com").await);
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let svc = fixture::service();
        drop(svc.execute(command("jdoe", "secret")).await.unwrap());

        let mut dup = command("jsmith", "secret");
        dup.email = "jdoe@example.com".parse().unwrap();
        let err = svc.execute(dup).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmailOccupied));
        assert_eq!(err.as_ref().to_string(), "Email already exists");
        assert!(stored(&svc, "jsmith").await.is_none());
    }

    #[tokio::test]
    async fn checks_username_before_email() {
        let svc = fixture::service();
        drop(svc.execute(command("jdoe", "secret")).await.unwrap());

        let err = svc.execute(command("jdoe", "secret")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UsernameOccupied));
    }
}
