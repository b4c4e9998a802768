use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use model::{NewUser, Priority, Task, User};
use tokio::sync::RwLock;

/// A fully-populated task record ready for insertion. The service layer
/// fills defaults before handing input over, so nothing is optional-with-a-
/// default at this level; the repository only assigns identity and the
/// creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskRecord {
    pub user_id: u32,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub is_outdoor: bool,
    pub due_date: Option<DateTime<Utc>>,
}

/// Uniqueness violation on user insert. The only failure this layer can
/// produce; everything else it is handed is assumed well-formed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("Email '{0}' is already registered")]
    EmailTaken(String),
}

#[derive(Debug)]
struct StorageInner {
    users: BTreeMap<u32, User>,
    tasks: BTreeMap<u32, Task>,
    next_user_id: u32,
    next_task_id: u32,
}

/// The authoritative in-memory store for users and tasks.
///
/// Records live in maps keyed by id; ids are assigned monotonically and
/// never reused within the store's lifetime, so ordered map iteration
/// doubles as insertion order. The whole structure sits behind one lock and
/// the read-counter/increment/insert sequence runs under the write guard,
/// which keeps identity assignment exclusive on a multi-threaded runtime.
#[derive(Debug)]
pub struct Storage {
    inner: RwLock<StorageInner>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StorageInner {
                users: BTreeMap::new(),
                tasks: BTreeMap::new(),
                next_user_id: 1,
                next_task_id: 1,
            }),
        }
    }

    /// Inserts a new user, assigning a fresh id. Username and email
    /// uniqueness are enforced here, under the same write guard that
    /// assigns identity, so there is no check-then-insert window.
    #[tracing::instrument(skip(self, new_user))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, ConflictError> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .values()
            .any(|user| user.username == new_user.username)
        {
            return Err(ConflictError::UsernameTaken(new_user.username));
        }
        if inner.users.values().any(|user| user.email == new_user.email) {
            return Err(ConflictError::EmailTaken(new_user.email));
        }

        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = User {
            id,
            username: new_user.username,
            password: new_user.password,
            name: new_user.name,
            email: new_user.email,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    pub async fn get_user(&self, id: u32) -> Option<User> {
        self.inner.read().await.users.get(&id).cloned()
    }

    /// Looks a user up by exact, case-sensitive username.
    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Stores a task under a fresh id with the insertion instant as its
    /// creation timestamp, and returns the stored record.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, record: NewTaskRecord) -> Task {
        let mut inner = self.inner.write().await;
        let id = inner.next_task_id;
        inner.next_task_id += 1;
        let task = Task {
            id,
            user_id: record.user_id,
            title: record.title,
            description: record.description,
            priority: record.priority,
            is_outdoor: record.is_outdoor,
            created_at: Utc::now(),
            due_date: record.due_date,
        };
        inner.tasks.insert(id, task.clone());
        task
    }

    /// All tasks belonging to `owner_id`, in insertion order. Empty when
    /// the owner has none.
    pub async fn tasks_by_owner(&self, owner_id: u32) -> Vec<Task> {
        self.inner
            .read()
            .await
            .tasks
            .values()
            .filter(|task| task.user_id == owner_id)
            .cloned()
            .collect()
    }

    /// Removes the task if present. Idempotent; returns whether a record
    /// was actually removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: u32) -> bool {
        self.inner.write().await.tasks.remove(&id).is_some()
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
