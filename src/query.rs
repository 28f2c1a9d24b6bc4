//! Derived views over the task collection.
//!
//! Everything here is a pure function of a task slice; none of it writes.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::fields::{StatusFilter, SubjectFilter};
use crate::task::Task;

/// Tasks passing both filters, in their original order.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    status: StatusFilter,
    subject: &SubjectFilter,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| status.matches(t.completed) && subject.matches(&t.subject))
        .collect()
}

/// Every subject used by at least one task.
pub fn distinct_subjects(tasks: &[Task]) -> BTreeSet<String> {
    tasks.iter().map(|t| t.subject.clone()).collect()
}

/// Pending tasks whose due date is before `today`.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date < today
}

/// `(completed, total)` subtask counts.
pub fn sub_task_progress(task: &Task) -> (usize, usize) {
    let done = task.sub_tasks.iter().filter(|s| s.completed).count();
    (done, task.sub_tasks.len())
}

/// Resolve a user-typed identifier to a task id.
///
/// Tries, in order: an exact id, a unique id prefix, then a case-insensitive
/// exact title. Several matches at the same step are an error.
pub fn resolve_task(identifier: &str, tasks: &[Task]) -> Result<String, StoreError> {
    let identifier = identifier.trim();
    if let Some(t) = tasks.iter().find(|t| t.id == identifier) {
        return Ok(t.id.clone());
    }

    if !identifier.is_empty() {
        let by_prefix: Vec<&Task> = tasks.iter().filter(|t| t.id.starts_with(identifier)).collect();
        match by_prefix.len() {
            0 => {}
            1 => return Ok(by_prefix[0].id.clone()),
            count => {
                return Err(StoreError::Ambiguous {
                    identifier: identifier.to_string(),
                    count,
                })
            }
        }
    }

    let wanted = identifier.to_lowercase();
    let by_title: Vec<&Task> = tasks.iter().filter(|t| t.title.to_lowercase() == wanted).collect();
    match by_title.len() {
        0 => Err(StoreError::task_not_found(identifier)),
        1 => Ok(by_title[0].id.clone()),
        count => Err(StoreError::Ambiguous {
            identifier: identifier.to_string(),
            count,
        }),
    }
}

/// Resolve a subtask by exact id, unique id prefix, or case-insensitive title.
pub fn resolve_sub_task(identifier: &str, task: &Task) -> Result<String, StoreError> {
    let identifier = identifier.trim();
    if let Some(s) = task.sub_task(identifier) {
        return Ok(s.id.clone());
    }
    let wanted = identifier.to_lowercase();
    let matches: Vec<&str> = task
        .sub_tasks
        .iter()
        .filter(|s| (!identifier.is_empty() && s.id.starts_with(identifier)) || s.title.to_lowercase() == wanted)
        .map(|s| s.id.as_str())
        .collect();
    match matches.len() {
        0 => Err(StoreError::sub_task_not_found(identifier)),
        1 => Ok(matches[0].to_string()),
        count => Err(StoreError::Ambiguous {
            identifier: identifier.to_string(),
            count,
        }),
    }
}
