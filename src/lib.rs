// tasklist - to-do list with durable local storage and a dark-mode theme

pub mod clock;
pub mod config;
pub mod file_store;
pub mod filter;
pub mod models;
pub mod render;
pub mod shell;
pub mod sqlite_store;
pub mod storage;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Backend, Config};
pub use file_store::FileStorage;
pub use models::{Filter, Preferences, Task, TaskId};
pub use sqlite_store::SqliteStorage;
pub use storage::{DARK_MODE_KEY, MemoryStorage, Storage, TASKS_KEY};
pub use store::TaskStore;
pub use view::{AddForm, Draft, Intent, TaskRow, View};
