//! The client-side task store.
//!
//! [`TaskStore`] is the authoritative local projection of one owner's tasks:
//! the full set as last confirmed by the server, the active filter, and the
//! derived filtered view. Every path that touches `tasks` or `filter` goes
//! through [`TaskStore::recompute_derived`] in the same step, so the derived
//! view can never be observed stale against a fresher task set.

use model::{NewTask, Priority, Task};

use crate::api::{ApiError, TaskApi};

/// The single active filter over the local task set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Every task passes.
    #[default]
    All,
    /// Only tasks with the given priority pass.
    Priority(Priority),
}

impl Filter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Priority(priority) => task.priority == priority,
        }
    }
}

/// Whether a load is currently in flight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
}

/// Tag handed out by [`TaskStore::begin_load`]. A load result is only
/// applied if its ticket is still the latest issued, so an older in-flight
/// load resolving late cannot overwrite a newer one's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

/// Locally cached, filtered view of one owner's tasks.
///
/// Records only enter `tasks` after server confirmation: a failed create or
/// delete leaves the set untouched and stores a human-readable message in
/// `last_error` instead. There is no optimistic insert.
pub struct TaskStore<A> {
    api: A,
    tasks: Vec<Task>,
    filter: Filter,
    derived: Vec<Task>,
    sync_status: SyncStatus,
    last_error: Option<String>,
    load_seq: u64,
}

impl<A: TaskApi> TaskStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            filter: Filter::All,
            derived: Vec::new(),
            sync_status: SyncStatus::Idle,
            last_error: None,
            load_seq: 0,
        }
    }

    /// The full task set as last confirmed by the server.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The active filter applied to the full set.
    pub fn derived(&self) -> &[Task] {
        &self.derived
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync_status
    }

    /// Message from the most recent failed operation, cleared by the next
    /// successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces the local set wholesale with the server's current list for
    /// `owner_id` and recomputes the derived view.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self, owner_id: u32) -> Result<(), ApiError> {
        let ticket = self.begin_load();
        let result = self.api.list_tasks(owner_id).await;
        self.complete_load(ticket, result)
    }

    /// Issues a new load ticket, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.sync_status = SyncStatus::Loading;
        LoadTicket { seq: self.load_seq }
    }

    /// Applies a load result. A result arriving under a superseded ticket is
    /// discarded outright, success and failure alike, and reported as `Ok`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Task>, ApiError>,
    ) -> Result<(), ApiError> {
        if ticket.seq != self.load_seq {
            tracing::debug!(seq = ticket.seq, latest = self.load_seq, "Discarding stale load");
            return Ok(());
        }
        self.sync_status = SyncStatus::Idle;
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.last_error = None;
                self.recompute_derived();
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Sends the payload to the server and, on success, appends the returned
    /// record with its server-assigned id and creation timestamp. On failure
    /// the local set is left untouched.
    #[tracing::instrument(skip(self, new_task))]
    pub async fn create(&mut self, new_task: NewTask) -> Result<(), ApiError> {
        match self.api.create_task(new_task).await {
            Ok(task) => {
                self.tasks.push(task);
                self.last_error = None;
                self.recompute_derived();
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Requests removal server-side and, on success, drops the matching
    /// record locally. On failure the local set is left untouched.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, task_id: u32) -> Result<(), ApiError> {
        match self.api.delete_task(task_id).await {
            Ok(()) => {
                self.tasks.retain(|task| task.id != task_id);
                self.last_error = None;
                self.recompute_derived();
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Sets the active filter and recomputes the derived view. Local-only,
    /// never touches the server.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.recompute_derived();
    }

    /// Empties the local set, e.g. at logout. Local-only.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.last_error = None;
        self.recompute_derived();
    }

    fn recompute_derived(&mut self) {
        self.derived = self
            .tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .cloned()
            .collect();
    }
}
