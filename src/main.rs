use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use std::io;
use std::path::{Path, PathBuf};
use tasklist::render::render_view;
use tasklist::{
    Backend, Config, FileStorage, Filter, Intent, SqliteStorage, Storage, TaskId, TaskStore, View, shell,
};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "tasklist - a to-do list with durable local storage and a dark-mode theme")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Directory holding the stored tasks (default: from config, else the user data dir)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Path to the config file (default: <config dir>/tasklist/tasklist.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add {
        heading: String,

        /// Body text shown when the task is expanded
        #[arg(short, long, default_value = "")]
        script: String,
    },

    /// Mark a task finished / unfinished
    Toggle { id: TaskId },

    /// Delete a task
    Delete { id: TaskId },

    /// Show the task list
    List {
        #[arg(short, long, value_enum, default_value_t = Filter::All)]
        filter: Filter,

        /// Show this task's script
        #[arg(short, long)]
        expand: Option<TaskId>,
    },

    /// Set the dark mode preference
    DarkMode {
        #[arg(value_enum, default_value_t = Switch::Toggle)]
        state: Switch,
    },

    /// Interactive session
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
    Toggle,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(raise_level(config.level(), cli.verbose))
        .with_writer(io::stderr)
        .init();

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let store_path = cli.store_path.clone().unwrap_or_else(|| config.store_path.clone());
    let backend = cli.backend.unwrap_or(config.backend);
    let mut store = TaskStore::open(open_storage(backend, &store_path)?);

    match cli.command {
        Commands::Add { heading, script } => match store.add_task(&heading, &script)? {
            Some(id) => println!("Added task #{}", id),
            None => println!("Heading is empty, nothing added"),
        },
        Commands::Toggle { id } => {
            if store.toggle_task(id)? {
                let state = match store.get(id) {
                    Some(task) if task.completed => "finished",
                    _ => "unfinished",
                };
                println!("Task #{} marked {}", id, state);
            } else {
                println!("No task #{}", id);
            }
        }
        Commands::Delete { id } => {
            if store.delete_task(id)? {
                println!("Deleted task #{}", id);
            } else {
                println!("No task #{}", id);
            }
        }
        Commands::List { filter, expand } => {
            store.set_filter(filter);
            let mut view = View::new(store);
            if let Some(id) = expand {
                view.dispatch(Intent::ToggleExpand(id))?;
            }
            print!("{}", render_view(&view));
        }
        Commands::DarkMode { state } => {
            let dark_mode = match state {
                Switch::On => true,
                Switch::Off => false,
                Switch::Toggle => !store.dark_mode(),
            };
            store.set_dark_mode(dark_mode)?;
            println!("Dark mode {}", if dark_mode { "on" } else { "off" });
        }
        Commands::Shell => {
            let mut view = View::new(store);
            println!("{}", shell::HELP);
            shell::run(&mut view, io::stdin().lock(), io::stdout().lock())?;
            info!(count = view.store().len(), "Shell session ended");
        }
    }

    Ok(())
}

fn open_storage(backend: Backend, path: &Path) -> Result<Box<dyn Storage>> {
    let storage: Box<dyn Storage> = match backend {
        Backend::File => Box::new(FileStorage::open(path)?),
        Backend::Sqlite => Box::new(SqliteStorage::open(path)?),
    };
    Ok(storage)
}


fn raise_level(base: Level, verbose: u8) -> Level {
    const LEVELS: [Level; 5] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];
    let start = LEVELS.iter().position(|l| *l == base).unwrap_or(1);
    LEVELS[(start + verbose as usize).min(LEVELS.len() - 1)]
}
