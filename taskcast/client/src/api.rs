//! HTTP access to the taskcast server.
//!
//! [`TaskApi`] is the seam the rest of the client is written against; the
//! concrete [`HttpApi`] implementation speaks JSON over reqwest. Non-success
//! responses are decoded into the server's error body so callers get the
//! server's own message rather than a bare status code.

use async_trait::async_trait;
use model::{Credentials, ErrorResponse, NewTask, NewUser, PublicUser, Task, TaskStats};
use reqwest::StatusCode;

/// Errors surfaced by API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status. The message is the
    /// server's own, when it sent one.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    /// The request never completed or the response body could not be read.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Operations the taskcast server exposes to clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi {
    async fn register(&self, new_user: NewUser) -> Result<PublicUser, ApiError>;
    async fn login(&self, credentials: Credentials) -> Result<PublicUser, ApiError>;
    /// All tasks belonging to `owner_id`.
    async fn list_tasks(&self, owner_id: u32) -> Result<Vec<Task>, ApiError>;
    /// Creates a task and returns the stored record with its server-assigned
    /// id and creation timestamp.
    async fn create_task(&self, new_task: NewTask) -> Result<Task, ApiError>;
    /// Removes a task. Absent ids succeed; deletion is idempotent server-side.
    async fn delete_task(&self, id: u32) -> Result<(), ApiError>;
    /// Aggregate statistics for one owner's task set.
    async fn task_stats(&self, owner_id: u32) -> Result<TaskStats, ApiError>;
}

/// Reqwest-backed [`TaskApi`] implementation.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Creates a client against `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET request");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST request");
        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    /// Turns a non-success response into an [`ApiError::Api`], preferring the
    /// server's `{"message": ...}` body over a synthesized one.
    async fn error_from(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("Request failed with status {status}"));
        ApiError::Api { status, message }
    }
}

#[async_trait]
impl TaskApi for HttpApi {
    async fn register(&self, new_user: NewUser) -> Result<PublicUser, ApiError> {
        self.post("/api/users/register", &new_user).await
    }

    async fn login(&self, credentials: Credentials) -> Result<PublicUser, ApiError> {
        self.post("/api/users/login", &credentials).await
    }

    async fn list_tasks(&self, owner_id: u32) -> Result<Vec<Task>, ApiError> {
        self.get(&format!("/api/tasks?userId={owner_id}")).await
    }

    async fn create_task(&self, new_task: NewTask) -> Result<Task, ApiError> {
        self.post("/api/tasks", &new_task).await
    }

    async fn delete_task(&self, id: u32) -> Result<(), ApiError> {
        let url = format!("{}/api/tasks/{id}", self.base_url);
        tracing::debug!(%url, "DELETE request");
        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    async fn task_stats(&self, owner_id: u32) -> Result<TaskStats, ApiError> {
        self.get(&format!("/api/tasks/stats/{owner_id}")).await
    }
}
