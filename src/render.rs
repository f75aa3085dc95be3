// Terminal rendering of the task list

use crate::models::Filter;
use crate::storage::Storage;
use crate::view::{AddForm, TaskRow, View};
use colored::{Color, ColoredString, Colorize};
use std::fmt::Write;

/// Colour palette for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub row: Color,
    pub accent: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        text: Color::TrueColor { r: 0x20, g: 0x6A, b: 0x83 },
        row: Color::TrueColor { r: 0x37, g: 0x47, b: 0x4F },
        accent: Color::TrueColor { r: 0x8C, g: 0x9B, b: 0xAB },
    };

    pub const DARK: Theme = Theme {
        text: Color::TrueColor { r: 0xB8, g: 0xAC, b: 0xF6 },
        row: Color::TrueColor { r: 0x8F, g: 0x7E, b: 0xE7 },
        accent: Color::TrueColor { r: 0xDA, g: 0x62, b: 0xAC },
    };

    pub fn for_dark_mode(dark_mode: bool) -> Theme {
        if dark_mode { Theme::DARK } else { Theme::LIGHT }
    }
}

/// Render one task row
pub fn render_row(row: &TaskRow, theme: Theme) -> String {
    let mark = if row.completed { "[x]" } else { "[ ]" };

    let mut heading: ColoredString = row.heading.color(theme.row);
    if row.completed {
        heading = heading.strikethrough().dimmed();
    }

    let mut out = format!(
        "{} {} {} {}",
        mark.color(theme.row),
        row.date.color(theme.text),
        heading,
        format!("#{}", row.id).color(theme.accent)
    );

    if let Some(script) = &row.script {
        let body = capitalize(script);
        if !body.is_empty() {
            let _ = write!(out, "\n    {}", body.color(theme.text));
        }
    }

    out
}

/// Render the whole screen: title, filter selector, rows and the add form
pub fn render_view<S: Storage>(view: &View<S>) -> String {
    let store = view.store();
    let theme = Theme::for_dark_mode(store.dark_mode());
    let mut out = String::new();

    let mode = if store.dark_mode() { "on" } else { "off" };
    let _ = writeln!(
        out,
        "{}  {}",
        "To Do List".color(theme.text).bold(),
        format!("Dark Mode: {}", mode).color(theme.accent)
    );
    let _ = writeln!(out, "{}", render_filter_selector(store.filter(), theme));

    let rows = view.rows();
    if rows.is_empty() {
        let _ = writeln!(out, "{}", "(no tasks)".color(theme.text).dimmed());
    }
    for row in &rows {
        let _ = writeln!(out, "{}", render_row(row, theme));
    }

    if let AddForm::Open(draft) = view.form() {
        let _ = writeln!(out, "{}", "Add Task".color(theme.accent).bold());
        let _ = writeln!(out, "  Heading: {}", draft.heading);
        let _ = writeln!(out, "  Script:  {}", draft.script);
    }

    out
}

fn render_filter_selector(active: Filter, theme: Theme) -> String {
    Filter::ALL
        .iter()
        .map(|&filter| {
            if filter == active {
                format!("<{}>", filter.label()).color(theme.accent).bold().to_string()
            } else {
                filter.label().color(theme.text).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// First character upper-cased, the rest untouched
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStorage;
    use crate::store::TaskStore;
    use crate::view::Intent;
    use chrono::NaiveDate;

    fn plain() {
        colored::control::set_override(false);
    }

    fn row(completed: bool, script: Option<&str>) -> TaskRow {
        TaskRow {
            id: 7,
            date: "05.03.2024".to_string(),
            heading: "WRITE REPORT".to_string(),
            completed,
            script: script.map(str::to_string),
        }
    }

    #[test]
    fn test_render_row_plain() {
        plain();
        assert_eq!(render_row(&row(false, None), Theme::LIGHT), "[ ] 05.03.2024 WRITE REPORT #7");
        assert_eq!(render_row(&row(true, None), Theme::DARK), "[x] 05.03.2024 WRITE REPORT #7");
    }

    #[test]
    fn test_render_row_expanded_script() {
        plain();
        let rendered = render_row(&row(false, Some("quarterly numbers")), Theme::LIGHT);
        assert_eq!(rendered, "[ ] 05.03.2024 WRITE REPORT #7\n    Quarterly numbers");

        let rendered = render_row(&row(false, Some("")), Theme::LIGHT);
        assert_eq!(rendered, "[ ] 05.03.2024 WRITE REPORT #7");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello world"), "Hello world");
        assert_eq!(capitalize("ışık"), "Işık");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_theme_for_dark_mode() {
        assert_eq!(Theme::for_dark_mode(true), Theme::DARK);
        assert_eq!(Theme::for_dark_mode(false), Theme::LIGHT);
    }

    #[test]
    fn test_render_view() {
        plain();
        let clock = FixedClock::new(1_000, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let mut view = View::new(TaskStore::with_clock(MemoryStorage::new(), clock));

        let empty = render_view(&view);
        assert!(empty.contains("To Do List"));
        assert!(empty.contains("<All Tasks> | Finished Tasks | Unfinished Tasks"));
        assert!(empty.contains("(no tasks)"));

        view.dispatch(Intent::OpenAddForm).unwrap();
        view.dispatch(Intent::EditHeading("draft heading".to_string())).unwrap();
        let with_form = render_view(&view);
        assert!(with_form.contains("Add Task"));
        assert!(with_form.contains("Heading: draft heading"));

        view.dispatch(Intent::SubmitNewTask).unwrap();
        view.dispatch(Intent::ToggleDarkMode).unwrap();
        let rendered = render_view(&view);
        assert!(rendered.contains("Dark Mode: on"));
        assert!(rendered.contains("[ ] 05.03.2024 DRAFT HEADING #1000"));
        assert!(!rendered.contains("Add Task"));
    }
}
