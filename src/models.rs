// Data models for the task list

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task identifier: creation time in milliseconds since the Unix epoch
pub type TaskId = i64;

/// A single to-do record
///
/// Only `completed` changes after creation. The serialized field names match
/// the records written by earlier versions of the app, so existing data loads
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub heading: String,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub completed: bool,
    pub date: String,
}

impl Task {
    pub fn new(id: TaskId, heading: impl Into<String>, script: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id,
            heading: heading.into(),
            script: script.into(),
            completed: false,
            date: date.into(),
        }
    }
}

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Pending];

    /// Whether a task passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
        }
    }

    /// Label shown in the filter selector
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All Tasks",
            Filter::Completed => "Finished Tasks",
            Filter::Pending => "Unfinished Tasks",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Filter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "pending" => Ok(Filter::Pending),
            other => Err(eyre::eyre!(
                "Unknown filter: {} (expected all, completed or pending)",
                other
            )),
        }
    }
}

/// View preferences held by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub filter: Filter,
    pub dark_mode: bool,
}
