use model::{Credentials, NewUser, User};

use crate::store::{ConflictError, Storage};

pub mod api;

/// Error type for registration and login operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Username or email already in use.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    /// Login attempted with an empty username or password.
    #[error("Username and password are required")]
    MissingCredentials,
    /// Unknown username or wrong password. Deliberately the same message
    /// for both so the response does not reveal which usernames exist.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

pub struct UserService<'a> {
    storage: &'a Storage,
}

impl UserService<'_> {
    pub fn new(storage: &Storage) -> UserService<'_> {
        UserService { storage }
    }

    /// Registers a new user. Uniqueness of username and email is enforced
    /// by the repository insert.
    #[tracing::instrument(skip(self, new_user))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, AuthServiceError> {
        Ok(self.storage.create_user(new_user).await?)
    }

    /// Checks credentials by exact match against the stored password.
    #[tracing::instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: Credentials) -> Result<User, AuthServiceError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(AuthServiceError::MissingCredentials);
        }

        let user = self
            .storage
            .get_user_by_username(&credentials.username)
            .await
            .ok_or(AuthServiceError::InvalidCredentials)?;
        if user.password != credentials.password {
            return Err(AuthServiceError::InvalidCredentials);
        }
        Ok(user)
    }
}
