// Sort and filter pipeline deriving the displayed list

use crate::models::{Filter, Task};
use std::cmp::Ordering;

/// Display order: pending before completed, then newest (highest id) first
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed.cmp(&b.completed).then_with(|| b.id.cmp(&a.id))
}

/// Stable sort of the full task set into display order
pub fn sort_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| display_order(a, b));
    sorted
}

/// Keep the tasks that pass `filter`, preserving order
pub fn filter_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, filter: Filter) -> Vec<&'a Task> {
    tasks.into_iter().filter(|task| filter.matches(task)).collect()
}

/// Sort, then filter
///
/// Pure: the result depends only on `tasks` and `filter`, and the input is
/// never modified.
pub fn visible_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    filter_tasks(sort_tasks(tasks), filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskId;

    fn task(id: TaskId, completed: bool) -> Task {
        Task {
            completed,
            ..Task::new(id, format!("Task {}", id), "", "01.01.2024")
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task(10, true),
            task(40, false),
            task(20, false),
            task(50, true),
            task(30, false),
        ]
    }

    #[test]
    fn test_sort_pending_first_then_newest() {
        let tasks = sample();
        let sorted = sort_tasks(&tasks);
        assert_eq!(ids(&sorted), vec![40, 30, 20, 50, 10]);
    }

    #[test]
    fn test_sort_ordering_property() {
        let tasks = sample();
        let sorted = sort_tasks(&tasks);

        for (i, a) in sorted.iter().enumerate() {
            for b in &sorted[i + 1..] {
                if a.completed == b.completed {
                    assert!(a.id > b.id, "{} should follow {}", a.id, b.id);
                } else {
                    assert!(!a.completed && b.completed);
                }
            }
        }
    }

    #[test]
    fn test_sort_is_stable_for_equal_ids() {
        let mut first = task(5, false);
        first.heading = "first".to_string();
        let mut second = task(5, false);
        second.heading = "second".to_string();
        let tasks = vec![first, task(9, false), second];

        let sorted = sort_tasks(&tasks);
        let headings: Vec<&str> = sorted.iter().map(|t| t.heading.as_str()).collect();
        assert_eq!(headings, vec!["Task 9", "first", "second"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = sort_tasks(&tasks);
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_filter_exact_membership() {
        let tasks = sample();

        for filter in Filter::ALL {
            let visible = visible_tasks(&tasks, filter);

            // No extras
            assert!(visible.iter().all(|t| filter.matches(t)));

            // No omissions
            let expected = tasks.iter().filter(|t| filter.matches(t)).count();
            assert_eq!(visible.len(), expected);
        }
    }

    #[test]
    fn test_visible_tasks_by_filter() {
        let tasks = sample();
        assert_eq!(ids(&visible_tasks(&tasks, Filter::All)), vec![40, 30, 20, 50, 10]);
        assert_eq!(ids(&visible_tasks(&tasks, Filter::Pending)), vec![40, 30, 20]);
        assert_eq!(ids(&visible_tasks(&tasks, Filter::Completed)), vec![50, 10]);
    }

    #[test]
    fn test_visible_tasks_idempotent() {
        let tasks = sample();
        let first = ids(&visible_tasks(&tasks, Filter::All));
        let second = ids(&visible_tasks(&tasks, Filter::All));
        assert_eq!(first, second);
    }

    #[test]
    fn test_visible_tasks_empty() {
        assert!(visible_tasks(&[], Filter::Completed).is_empty());
    }
}
