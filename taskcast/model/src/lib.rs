use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority. The wire format uses the lowercase name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A stored task record. Identity and `created_at` are assigned by the
/// server; everything else is caller-supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: u32,
    /// Id of the user who owns the task
    pub user_id: u32,
    /// Task title
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Task priority
    pub priority: Priority,
    /// Whether the task takes place outdoors
    pub is_outdoor: bool,
    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Payload for creating a task. Missing optional fields are filled with
/// their defaults by the server; `due_date` is an RFC 3339 string and is
/// parsed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Id of the user the task belongs to
    pub user_id: u32,
    /// Task title, must be non-empty after trimming
    pub title: String,
    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Priority, defaults to medium when omitted
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Outdoor flag, defaults to false when omitted
    #[serde(default)]
    pub is_outdoor: Option<bool>,
    /// Optional due date as an RFC 3339 string
    #[serde(default)]
    pub due_date: Option<String>,
}

impl NewTask {
    /// A payload with only the required fields set.
    pub fn titled(user_id: u32, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: None,
            priority: None,
            is_outdoor: None,
            due_date: None,
        }
    }
}

/// Reserved update shape. No endpoint exercises it yet; it mirrors the
/// create payload with every field optional and no owner change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub is_outdoor: Option<bool>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// A stored user record, including the opaque credential. Never serialized
/// into an API response; see [`PublicUser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

/// The user shape returned by the API: everything but the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique identifier for the user
    pub id: u32,
    /// Login name, unique and case-sensitive
    pub username: String,
    /// Display name
    pub name: String,
    /// Email address, unique
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Aggregate statistics over one owner's task set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Count of all tasks
    pub total: usize,
    /// Tasks whose due date falls within the current local day
    pub due_today: usize,
    /// Tasks flagged as outdoor
    pub outdoor: usize,
    /// Tasks created on or after the most recent week start (Sunday, local time)
    pub created_this_week: usize,
    /// Per-priority counts and shares
    pub priorities: PriorityBreakdown,
}

/// Per-priority counts plus each count as a whole percentage of the total.
/// Percentages are zero when the task set is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub high_percentage: u32,
    pub medium_percentage: u32,
    pub low_percentage: u32,
}

/// JSON error body used by every non-success API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
