// View state and the intents that drive the store

use crate::models::{Filter, Task, TaskId};
use crate::storage::Storage;
use crate::store::TaskStore;
use eyre::Result;
use tracing::debug;

/// In-progress task data while the add form is open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub heading: String,
    pub script: String,
}

/// Add form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddForm {
    #[default]
    Closed,
    Open(Draft),
}

impl AddForm {
    pub fn is_open(&self) -> bool {
        matches!(self, AddForm::Open(_))
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            AddForm::Open(draft) => Some(draft),
            AddForm::Closed => None,
        }
    }
}

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenAddForm,
    EditHeading(String),
    EditScript(String),
    SubmitNewTask,
    CancelAddForm,
    ToggleComplete(TaskId),
    Delete(TaskId),
    ChangeFilter(Filter),
    ToggleExpand(TaskId),
    ToggleDarkMode,
}

/// One line of the rendered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub date: String,
    pub heading: String,
    pub completed: bool,
    /// Body text, present only for the expanded task
    pub script: Option<String>,
}

impl TaskRow {
    fn new(task: &Task, expanded: bool) -> Self {
        Self {
            id: task.id,
            date: task.date.clone(),
            heading: task.heading.to_uppercase(),
            completed: task.completed,
            script: expanded.then(|| task.script.clone()),
        }
    }
}

/// The store plus presentation-only state
///
/// Neither the add form nor the expanded task is ever written to storage.
pub struct View<S: Storage> {
    store: TaskStore<S>,
    form: AddForm,
    expanded: Option<TaskId>,
}

impl<S: Storage> View<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        Self {
            store,
            form: AddForm::Closed,
            expanded: None,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn form(&self) -> &AddForm {
        &self.form
    }

    pub fn expanded(&self) -> Option<TaskId> {
        self.expanded
    }

    pub fn into_store(self) -> TaskStore<S> {
        self.store
    }

    /// Apply one intent
    ///
    /// Errors only come from storage writes.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        debug!(?intent, "dispatch");

        match intent {
            Intent::OpenAddForm => {
                if !self.form.is_open() {
                    self.form = AddForm::Open(Draft::default());
                }
            }
            Intent::EditHeading(heading) => {
                if let AddForm::Open(draft) = &mut self.form {
                    draft.heading = heading;
                }
            }
            Intent::EditScript(script) => {
                if let AddForm::Open(draft) = &mut self.form {
                    draft.script = script;
                }
            }
            Intent::SubmitNewTask => {
                let AddForm::Open(draft) = &self.form else {
                    return Ok(());
                };
                // A rejected heading leaves the form open with the draft intact
                if self.store.add_task(&draft.heading, &draft.script)?.is_some() {
                    self.form = AddForm::Closed;
                }
            }
            Intent::CancelAddForm => {
                self.form = AddForm::Closed;
            }
            Intent::ToggleComplete(id) => {
                self.store.toggle_task(id)?;
            }
            Intent::Delete(id) => {
                if self.expanded == Some(id) {
                    self.expanded = None;
                }
                self.store.delete_task(id)?;
            }
            Intent::ChangeFilter(filter) => {
                self.store.set_filter(filter);
            }
            Intent::ToggleExpand(id) => {
                self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
            }
            Intent::ToggleDarkMode => {
                let dark_mode = !self.store.dark_mode();
                self.store.set_dark_mode(dark_mode)?;
            }
        }

        Ok(())
    }

    /// Rows for the current filter, in display order
    pub fn rows(&self) -> Vec<TaskRow> {
        self.store
            .visible_tasks()
            .into_iter()
            .map(|task| TaskRow::new(task, self.expanded == Some(task.id)))
            .collect()
    }
}
