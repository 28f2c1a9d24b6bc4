//! Task data structures and validation.
//!
//! This module defines the `Task` and `SubTask` records as they are stored,
//! the `TaskDraft` and `TaskPatch` inputs accepted by the store, and the
//! validation rule for the mandatory fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fields::{Field, Priority};

/// A checklist item owned by a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    /// Unique within the owning task only.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// A unit of academic work.
///
/// Serialises with camelCase keys, matching the layout of the `studentTasks`
/// slot. `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subject: String,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

impl Task {
    /// Get a subtask by ID.
    pub fn sub_task(&self, id: &str) -> Option<&SubTask> {
        self.sub_tasks.iter().find(|s| s.id == id)
    }

    /// Get a mutable reference to a subtask by ID.
    pub fn sub_task_mut(&mut self, id: &str) -> Option<&mut SubTask> {
        self.sub_tasks.iter_mut().find(|s| s.id == id)
    }
}

/// User input for a new task, before the store assigns identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    /// Initial subtask titles, in order. Blank titles are dropped.
    pub sub_tasks: Vec<String>,
}

impl TaskDraft {
    /// Start a draft with the three mandatory fields filled in.
    pub fn new(title: impl Into<String>, subject: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            due_date: Some(due_date),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sub_task(mut self, title: impl Into<String>) -> Self {
        self.sub_tasks.push(title.into());
        self
    }
}

/// A subtask entry in an edited subtask list.
///
/// Entries with an `id` that matches an existing subtask keep that id;
/// entries without one are new and get a fresh id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubTaskEdit {
    pub id: Option<String>,
    pub title: String,
    pub completed: bool,
}

impl From<&SubTask> for SubTaskEdit {
    fn from(s: &SubTask) -> Self {
        Self {
            id: Some(s.id.clone()),
            title: s.title.clone(),
            completed: s.completed,
        }
    }
}

/// Partial update for an existing task. Absent fields are left alone.
///
/// There is deliberately no way to express a new `id` or `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
    /// Replaces the whole subtask list when present.
    pub sub_tasks: Option<Vec<SubTaskEdit>>,
}

impl TaskPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}

/// Check the mandatory fields of a draft, reporting every one that is missing.
///
/// Only `title`, `subject` and `due_date` are validated; blank means empty
/// after trimming.
pub fn validate_draft(draft: &TaskDraft) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if draft.title.trim().is_empty() {
        missing.push(Field::Title);
    }
    if draft.subject.trim().is_empty() {
        missing.push(Field::Subject);
    }
    if draft.due_date.is_none() {
        missing.push(Field::DueDate);
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::missing(missing))
    }
}

/// Check a stored task still carries its mandatory fields after a merge.
pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if task.title.trim().is_empty() {
        missing.push(Field::Title);
    }
    if task.subject.trim().is_empty() {
        missing.push(Field::Subject);
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::missing(missing))
    }
}
