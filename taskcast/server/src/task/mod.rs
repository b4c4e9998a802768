use chrono::{DateTime, Datelike, Local, Utc};
use model::{NewTask, Priority, PriorityBreakdown, Task, TaskStats};

use crate::store::{NewTaskRecord, Storage};

pub mod api;

/// Error type for task service operations. Every variant is a caller
/// mistake, recoverable by resubmission.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Title missing or blank after trimming.
    #[error("Title is required")]
    MissingTitle,
    /// Due date present but not a valid RFC 3339 timestamp.
    #[error("Invalid due date '{0}'")]
    InvalidDueDate(String),
}

pub struct TaskService<'a> {
    storage: &'a Storage,
}

impl TaskService<'_> {
    pub fn new(storage: &Storage) -> TaskService<'_> {
        TaskService { storage }
    }

    /// Validates and normalizes the payload, then stores it.
    ///
    /// This is the single place defaults are filled: a missing description
    /// stays null, a missing priority becomes medium, a missing outdoor
    /// flag becomes false. The repository only ever sees fully-populated
    /// records.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, payload: NewTask) -> Result<Task, TaskServiceError> {
        let title = payload.title.trim();
        if title.is_empty() {
            return Err(TaskServiceError::MissingTitle);
        }

        let due_date = match payload.due_date {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map(|parsed| parsed.with_timezone(&Utc))
                    .map_err(|_| TaskServiceError::InvalidDueDate(raw))?,
            ),
            None => None,
        };

        let record = NewTaskRecord {
            user_id: payload.user_id,
            title: title.to_string(),
            description: payload.description,
            priority: payload.priority.unwrap_or_default(),
            is_outdoor: payload.is_outdoor.unwrap_or(false),
            due_date,
        };
        Ok(self.storage.create_task(record).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn tasks_for_owner(&self, owner_id: u32) -> Vec<Task> {
        self.storage.tasks_by_owner(owner_id).await
    }

    /// Removes the task if present; absent ids are a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: u32) -> bool {
        self.storage.delete_task(id).await
    }

    /// Statistics for one owner's task set as of `now`.
    #[tracing::instrument(skip(self, now))]
    pub async fn stats_for_owner(&self, owner_id: u32, now: DateTime<Local>) -> TaskStats {
        let tasks = self.storage.tasks_by_owner(owner_id).await;
        compute_stats(&tasks, now)
    }
}

/// Computes aggregate statistics over a task set, deterministic given the
/// same set and the same `now` instant. Day and week boundaries are local
/// time; the week starts on Sunday.
pub fn compute_stats(tasks: &[Task], now: DateTime<Local>) -> TaskStats {
    let today = now.date_naive();
    let week_start = today - chrono::Days::new(u64::from(now.weekday().num_days_from_sunday()));

    let due_today = tasks
        .iter()
        .filter(|task| {
            task.due_date
                .is_some_and(|due| due.with_timezone(&Local).date_naive() == today)
        })
        .count();

    let outdoor = tasks.iter().filter(|task| task.is_outdoor).count();

    let created_this_week = tasks
        .iter()
        .filter(|task| task.created_at.with_timezone(&Local).date_naive() >= week_start)
        .count();

    let total = tasks.len();
    let count_of = |priority: Priority| {
        tasks
            .iter()
            .filter(|task| task.priority == priority)
            .count()
    };
    let high = count_of(Priority::High);
    let medium = count_of(Priority::Medium);
    let low = count_of(Priority::Low);

    TaskStats {
        total,
        due_today,
        outdoor,
        created_this_week,
        priorities: PriorityBreakdown {
            high,
            medium,
            low,
            high_percentage: percentage(high, total),
            medium_percentage: percentage(medium, total),
            low_percentage: percentage(low, total),
        },
    }
}

/// Share of `count` in `total` as a whole percent, half rounding up. Zero
/// when the set is empty.
fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((count as f64 / total as f64) * 100.0).round() as u32
    }
}
