// Persistence port: string key-value storage holding the task set and flags

use crate::models::Task;
use eyre::{Context, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Key holding the JSON array of tasks
pub const TASKS_KEY: &str = "tasks";

/// Key holding the dark mode flag as `"true"` / `"false"`
pub const DARK_MODE_KEY: &str = "darkMode";

/// Durable string key-value storage
///
/// Backends implement `get_item` / `set_item`. The typed port methods
/// (`load`, `save`, `load_flag`, `save_flag`) are provided on top and are what
/// the store calls.
pub trait Storage {
    /// Read the raw value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the raw value stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Load the task set
    ///
    /// Never fails: missing, unreadable or malformed data yields an empty set.
    fn load(&self) -> Vec<Task> {
        match self.get_item(TASKS_KEY) {
            Ok(Some(raw)) => decode_tasks(&raw),
            Ok(None) => {
                debug!(key = TASKS_KEY, "No stored tasks, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = TASKS_KEY, error = ?e, "Failed to read stored tasks, starting empty");
                Vec::new()
            }
        }
    }

    /// Write the full task set
    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks).context("Failed to serialize tasks")?;
        self.set_item(TASKS_KEY, &json).context("Failed to save tasks")?;
        debug!(count = tasks.len(), "Saved tasks");
        Ok(())
    }

    /// Load a boolean flag; anything other than the text `"true"` is false
    fn load_flag(&self, key: &str) -> bool {
        match self.get_item(key) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(key, error = ?e, "Failed to read flag, assuming false");
                false
            }
        }
    }

    /// Write a boolean flag as `"true"` / `"false"`
    fn save_flag(&mut self, key: &str, value: bool) -> Result<()> {
        self.set_item(key, if value { "true" } else { "false" })
            .with_context(|| format!("Failed to save flag {}", key))
    }
}

/// Decode a stored task array
///
/// A value that is not a JSON array decodes to the empty set. Within the
/// array, records that fail to decode, have a blank heading, or repeat an
/// earlier id are skipped.
pub fn decode_tasks(raw: &str) -> Vec<Task> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(key = TASKS_KEY, error = ?e, "Stored tasks are not a JSON array, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let task: Task = match serde_json::from_value(value) {
            Ok(t) => t,
            Err(e) => {
                warn!(index, error = ?e, "Failed to decode task, skipping");
                continue;
            }
        };

        if task.heading.trim().is_empty() {
            warn!(index, id = task.id, "Task has a blank heading, skipping");
            continue;
        }

        if !seen.insert(task.id) {
            warn!(index, id = task.id, "Duplicate task id, skipping");
            continue;
        }

        tasks.push(task);
    }

    info!(count = tasks.len(), "Loaded tasks");
    tasks
}

/// In-memory storage
///
/// Clones share the same map, so a test can hand one clone to the store and
/// inspect what was written through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with raw key-value pairs
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let items = items.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            items: Rc::new(RefCell::new(items)),
        }
    }

    /// Raw value currently stored under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}
