//! Session orchestration over the store and the stats rules.
//!
//! `Tracker` is what the CLI and the dashboard talk to. It forwards plain
//! mutations to the `Store` and owns the one rule that spans both: the
//! completion streak.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::{StoreError, ValidationError};
use crate::ids::IdGenerator;
use crate::stats::{compute_stats, next_streak, Stats};
use crate::storage::KeyValueStore;
use crate::store::Store;
use crate::task::{SubTask, SubTaskEdit, Task, TaskDraft, TaskPatch};

/// Result of toggling a task through the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub task: Task,
    /// Streak after the toggle.
    pub streak: u32,
    /// True when this toggle completed the task.
    pub completed_now: bool,
}

/// A single user session.
pub struct Tracker {
    store: Store,
}

impl Tracker {
    pub fn open(
        backend: impl KeyValueStore + 'static,
        clock: impl Clock + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self, StoreError> {
        Ok(Self::new(Store::open(backend, clock, ids)?))
    }

    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn stats(&self) -> Stats {
        compute_stats(
            self.store.tasks(),
            self.store.streak(),
            self.store.monthly_goal(),
            self.store.clock(),
        )
    }

    /// Today's date in the user's time zone.
    pub fn today(&self) -> NaiveDate {
        self.store.clock().today()
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        self.store.create_task(draft)
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        self.store.update_task(id, patch)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.delete_task(id)
    }

    /// Toggle a task and, when it becomes complete, bump and persist the streak.
    ///
    /// A completion is only kept together with its streak increment: if the
    /// streak write fails the toggle is undone, so a retry completes it again.
    pub fn toggle_task(&mut self, id: &str) -> Result<ToggleOutcome, StoreError> {
        let task = self.store.toggle_task(id)?;
        let was_completed = !task.completed;
        let streak = next_streak(self.store.streak(), was_completed, task.completed);
        if streak != self.store.streak() {
            if let Err(e) = self.store.set_streak(streak) {
                warn!(task_id = %id, error = %e, "streak write failed, undoing completion");
                if let Err(undo) = self.store.toggle_task(id) {
                    warn!(task_id = %id, error = %undo, "could not undo completion");
                }
                return Err(e);
            }
            info!(task_id = %id, streak, "task completed, streak extended");
        }
        Ok(ToggleOutcome {
            completed_now: task.completed,
            task,
            streak,
        })
    }

    pub fn add_sub_task(&mut self, task_id: &str, title: &str) -> Result<SubTask, StoreError> {
        self.store.add_sub_task(task_id, title)
    }

    pub fn toggle_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> Result<(), StoreError> {
        self.store.toggle_sub_task(task_id, sub_task_id)
    }

    pub fn delete_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> Result<(), StoreError> {
        self.store.delete_sub_task(task_id, sub_task_id)
    }

    /// Give one subtask a new title through a subtask-list patch.
    ///
    /// Every other subtask keeps its id, title and completion.
    pub fn rename_sub_task(
        &mut self,
        task_id: &str,
        sub_task_id: &str,
        title: &str,
    ) -> Result<Task, StoreError> {
        let task = self
            .store
            .get(task_id)
            .ok_or_else(|| StoreError::task_not_found(task_id))?;
        if task.sub_task(sub_task_id).is_none() {
            return Err(StoreError::sub_task_not_found(sub_task_id));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::message("subtask title must not be blank").into());
        }
        let edits: Vec<SubTaskEdit> = task
            .sub_tasks
            .iter()
            .map(|s| {
                let mut edit = SubTaskEdit::from(s);
                if s.id == sub_task_id {
                    edit.title = title.to_string();
                }
                edit
            })
            .collect();
        let patch = TaskPatch {
            sub_tasks: Some(edits),
            ..TaskPatch::default()
        };
        self.store.update_task(task_id, patch)
    }

    pub fn set_monthly_goal(&mut self, goal: u32) -> Result<(), StoreError> {
        self.store.set_monthly_goal(goal)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()
    }
}
