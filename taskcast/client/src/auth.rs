//! The client-side auth session.
//!
//! Login and register go through the same [`TaskApi`] seam as the task
//! store. The session holds the server-confirmed user identity and nothing
//! else; credentials are never persisted.

use model::{Credentials, NewUser, PublicUser};

use crate::api::{ApiError, TaskApi};

/// Holds the currently logged-in user, if any. A failed login or
/// registration records the failure message and leaves the session
/// unchanged.
pub struct AuthSession<A> {
    api: A,
    user: Option<PublicUser>,
    last_error: Option<String>,
}

impl<A: TaskApi> AuthSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            user: None,
            last_error: None,
        }
    }

    pub fn user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Message from the most recent failed operation, cleared by the next
    /// successful one and by logout.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[tracing::instrument(skip(self, credentials))]
    pub async fn login(&mut self, credentials: Credentials) -> Result<(), ApiError> {
        match self.api.login(credentials).await {
            Ok(user) => {
                self.user = Some(user);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Registers a new account. On success the session is logged in as the
    /// new user, matching the server's register-then-authenticate flow.
    #[tracing::instrument(skip(self, new_user))]
    pub async fn register(&mut self, new_user: NewUser) -> Result<(), ApiError> {
        match self.api.register(new_user).await {
            Ok(user) => {
                self.user = Some(user);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Forgets the current user. Local-only.
    pub fn logout(&mut self) {
        self.user = None;
        self.last_error = None;
    }
}
