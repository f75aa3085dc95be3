// Task store: the authoritative task set and view preferences

use crate::clock::{Clock, SystemClock, format_date};
use crate::filter;
use crate::models::{Filter, Preferences, Task, TaskId};
use crate::storage::{DARK_MODE_KEY, Storage};
use eyre::Result;
use tracing::{debug, info};

/// Owns the task list and preferences, writing through to storage on change
///
/// Invalid input (blank heading, unknown id) is absorbed as a no-op. The only
/// error a mutation returns is a failed storage write, in which case the
/// in-memory state already reflects the mutation.
pub struct TaskStore<S: Storage> {
    storage: S,
    clock: Box<dyn Clock>,
    tasks: Vec<Task>,
    prefs: Preferences,
}

impl<S: Storage> TaskStore<S> {
    /// Load the store from `storage` using the wall clock
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    /// Load the store from `storage` with an explicit clock
    pub fn with_clock(storage: S, clock: impl Clock + 'static) -> Self {
        let tasks = storage.load();
        let dark_mode = storage.load_flag(DARK_MODE_KEY);

        info!(count = tasks.len(), dark_mode, "Opened task store");

        Self {
            storage,
            clock: Box::new(clock),
            tasks,
            prefs: Preferences {
                filter: Filter::default(),
                dark_mode,
            },
        }
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self) -> Filter {
        self.prefs.filter
    }

    pub fn dark_mode(&self) -> bool {
        self.prefs.dark_mode
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Tasks to display: sorted, then narrowed by the active filter
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::visible_tasks(&self.tasks, self.prefs.filter)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new pending task
    ///
    /// Returns `Ok(None)` without touching anything when the heading is blank.
    pub fn add_task(&mut self, heading: &str, script: &str) -> Result<Option<TaskId>> {
        if heading.trim().is_empty() {
            debug!("add_task: blank heading ignored");
            return Ok(None);
        }

        let id = self.next_id();
        let date = format_date(self.clock.today());
        self.tasks.push(Task::new(id, heading, script, date));

        info!(id, "Added task");
        self.persist_tasks()?;
        Ok(Some(id))
    }

    /// Flip `completed` on the task with `id`; returns whether one matched
    pub fn toggle_task(&mut self, id: TaskId) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "toggle_task: no such task");
            return Ok(false);
        };

        task.completed = !task.completed;
        info!(id, completed = task.completed, "Toggled task");
        self.persist_tasks()?;
        Ok(true)
    }

    /// Remove the task with `id`; returns whether one matched
    pub fn delete_task(&mut self, id: TaskId) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);

        if self.tasks.len() == before {
            debug!(id, "delete_task: no such task");
            return Ok(false);
        }

        info!(id, "Deleted task");
        self.persist_tasks()?;
        Ok(true)
    }

    /// Set the active filter (session state, not persisted)
    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "Set filter");
        self.prefs.filter = filter;
    }

    /// Set the theme flag and write it through
    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<()> {
        self.prefs.dark_mode = dark_mode;
        info!(dark_mode, "Set dark mode");
        self.storage.save_flag(DARK_MODE_KEY, dark_mode)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Clock time in ms, bumped past the newest existing id so ids stay unique
    /// and strictly increasing even within one clock tick
    fn next_id(&self) -> TaskId {
        let now = self.clock.now_ms();
        match self.tasks.iter().map(|t| t.id).max() {
            Some(newest) if newest >= now => newest + 1,
            _ => now,
        }
    }

    fn persist_tasks(&mut self) -> Result<()> {
        self.storage.save(&self.tasks)
    }
}
