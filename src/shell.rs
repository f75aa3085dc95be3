// Interactive line-oriented session driving the view

use crate::models::{Filter, TaskId};
use crate::render::render_view;
use crate::storage::Storage;
use crate::view::{Intent, View};
use eyre::{Result, eyre};
use std::io::{BufRead, Write};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  new                 open the add form
  heading <text>      set the draft heading
  script <text>       set the draft script
  submit              add the drafted task
  cancel              close the add form, discarding the draft
  toggle <id>         mark a task finished / unfinished
  delete <id>         delete a task
  filter <value>      show all, completed or pending tasks
  expand <id>         show or hide a task's script
  dark                toggle dark mode
  list                redraw the list
  help                show this help
  quit                leave";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    List,
    Help,
    Quit,
}

/// Parse one input line; blank lines parse to `None`
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "new" | "add" => Command::Intent(Intent::OpenAddForm),
        "heading" => Command::Intent(Intent::EditHeading(rest.to_string())),
        "script" => Command::Intent(Intent::EditScript(rest.to_string())),
        "submit" => Command::Intent(Intent::SubmitNewTask),
        "cancel" => Command::Intent(Intent::CancelAddForm),
        "toggle" => Command::Intent(Intent::ToggleComplete(parse_id(rest)?)),
        "delete" | "rm" => Command::Intent(Intent::Delete(parse_id(rest)?)),
        "filter" => Command::Intent(Intent::ChangeFilter(rest.parse::<Filter>()?)),
        "expand" => Command::Intent(Intent::ToggleExpand(parse_id(rest)?)),
        "dark" => Command::Intent(Intent::ToggleDarkMode),
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(eyre!("Unknown command: {} (try `help`)", other)),
    };

    Ok(Some(command))
}

fn parse_id(s: &str) -> Result<TaskId> {
    s.trim()
        .trim_start_matches('#')
        .parse()
        .map_err(|_| eyre!("Expected a task id, got `{}`", s))
}

/// Run the session until `quit` or end of input
///
/// Unparsable lines print a message and the session continues. Storage
/// write failures end the session with the error.
pub fn run<S, R, W>(view: &mut View<S>, input: R, mut output: W) -> Result<()>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render_view(view))?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(output, "{}", HELP)?,
            Ok(Some(Command::List)) => write!(output, "{}", render_view(view))?,
            Ok(Some(Command::Intent(intent))) => {
                view.dispatch(intent)?;
                write!(output, "{}", render_view(view))?;
            }
            Err(e) => {
                debug!(line = %line, error = %e, "Unparsable shell line");
                writeln!(output, "{}", e)?;
            }
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{MemoryStorage, TASKS_KEY};
    use crate::store::TaskStore;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn test_view() -> (View<MemoryStorage>, MemoryStorage) {
        colored::control::set_override(false);
        let storage = MemoryStorage::new();
        let clock = FixedClock::new(1_000, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        (View::new(TaskStore::with_clock(storage.clone(), clock)), storage)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(parse_command("new").unwrap(), Some(Command::Intent(Intent::OpenAddForm)));
        assert_eq!(
            parse_command("heading Buy  milk ").unwrap(),
            Some(Command::Intent(Intent::EditHeading("Buy  milk".to_string())))
        );
        assert_eq!(
            parse_command("script").unwrap(),
            Some(Command::Intent(Intent::EditScript(String::new())))
        );
        assert_eq!(
            parse_command("toggle #42").unwrap(),
            Some(Command::Intent(Intent::ToggleComplete(42)))
        );
        assert_eq!(
            parse_command("rm 7").unwrap(),
            Some(Command::Intent(Intent::Delete(7)))
        );
        assert_eq!(
            parse_command("filter pending").unwrap(),
            Some(Command::Intent(Intent::ChangeFilter(Filter::Pending)))
        );
        assert_eq!(parse_command("QUIT").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("toggle").is_err());
        assert!(parse_command("expand abc").is_err());
        assert!(parse_command("filter done").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn test_session_adds_and_completes_task() {
        let (mut view, storage) = test_view();
        let input = Cursor::new("new\nheading Write report\nsubmit\ntoggle 1000\nquit\nnew\n");
        let mut output = Vec::new();

        run(&mut view, input, &mut output).unwrap();

        let task = view.store().get(1000).unwrap();
        assert_eq!(task.heading, "Write report");
        assert!(task.completed);
        // Lines after quit are not processed
        assert!(!view.form().is_open());
        assert!(storage.raw(TASKS_KEY).unwrap().contains("\"completed\":true"));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[x] 05.03.2024 WRITE REPORT #1000"));
    }

    #[test]
    fn test_session_reports_bad_lines_and_continues() {
        let (mut view, _) = test_view();
        let input = Cursor::new("bogus\nhelp\nnew\nheading Still works\nsubmit\n");
        let mut output = Vec::new();

        run(&mut view, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unknown command: bogus"));
        assert!(text.contains("Commands:"));
        assert_eq!(view.store().len(), 1);
    }

    #[test]
    fn test_session_cancel_and_expand() {
        let (mut view, _) = test_view();
        let input = Cursor::new(
            "new\nheading Kept\nscript the body\nsubmit\nnew\nheading Dropped\ncancel\nexpand 1000\n",
        );
        let mut output = Vec::new();

        run(&mut view, input, &mut output).unwrap();

        assert_eq!(view.store().len(), 1);
        assert_eq!(view.expanded(), Some(1000));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("    The body"));
    }
}
