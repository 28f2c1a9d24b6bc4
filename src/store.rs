//! The authoritative task collection and its mutation paths.
//!
//! `Store` owns the in-memory task list plus the two persisted stats
//! scalars. Every mutation follows the same read-modify-write shape: clone
//! the collection, apply the change to the clone, write the whole clone to
//! the `studentTasks` slot, and only then swap it in. A rejected write
//! therefore leaves both memory and storage exactly as they were.
//!
//! Two stores opened over the same backend do not coordinate; whichever
//! writes last wins.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::{PersistenceError, StoreError, ValidationError};
use crate::ids::IdGenerator;
use crate::storage::{KeyValueStore, GOAL_SLOT, STREAK_SLOT, TASKS_SLOT};
use crate::task::{validate_draft, validate_task, SubTask, SubTaskEdit, Task, TaskDraft, TaskPatch};

/// Monthly goal used when none has been stored.
pub const DEFAULT_MONTHLY_GOAL: u32 = 20;

/// Draws before the store stops trusting the generator and adds a suffix.
const MAX_ID_DRAWS: usize = 32;

/// Task collection bound to a durable backend, a clock, and an id source.
pub struct Store {
    backend: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    tasks: Vec<Task>,
    streak: u32,
    monthly_goal: u32,
}

impl Store {
    /// Load all slots from `backend` and start a session.
    ///
    /// Missing slots start empty (goal defaults to 20). An undecodable task
    /// slot is an error so that a later write cannot clobber it; bad scalar
    /// slots are logged and replaced with their defaults.
    pub fn open(
        backend: impl KeyValueStore + 'static,
        clock: impl Clock + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self, StoreError> {
        let tasks = load_tasks(&backend)?;
        let streak = load_scalar(&backend, STREAK_SLOT, 0)?;
        let monthly_goal = match load_scalar(&backend, GOAL_SLOT, DEFAULT_MONTHLY_GOAL)? {
            0 => {
                warn!(slot = GOAL_SLOT, "stored monthly goal is zero, using default");
                DEFAULT_MONTHLY_GOAL
            }
            n => n,
        };
        info!(tasks = tasks.len(), streak, monthly_goal, "opened task store");
        Ok(Self {
            backend: Box::new(backend),
            clock: Box::new(clock),
            ids: Box::new(ids),
            tasks,
            streak,
            monthly_goal,
        })
    }

    /// All tasks, most recently created first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by ID.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The injected clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn monthly_goal(&self) -> u32 {
        self.monthly_goal
    }

    /// Validate a draft and prepend the resulting task.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        validate_draft(&draft)?;
        let Some(due_date) = draft.due_date else {
            // validate_draft has already rejected this.
            return Err(ValidationError::missing(vec![crate::fields::Field::DueDate]).into());
        };

        let taken: HashSet<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        let id = self.fresh_id(|candidate| taken.contains(candidate));

        let mut sub_tasks: Vec<SubTask> = Vec::new();
        for title in draft.sub_tasks.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let sub_id = self.fresh_id(|c| sub_tasks.iter().any(|s| s.id == c));
            sub_tasks.push(SubTask {
                id: sub_id,
                title: title.to_string(),
                completed: false,
            });
        }

        let task = Task {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            subject: draft.subject.trim().to_string(),
            priority: draft.priority,
            due_date,
            completed: false,
            created_at: self.clock.now(),
            sub_tasks,
        };

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task.clone());
        next.extend(self.tasks.iter().cloned());
        self.commit(next)?;
        debug!(task_id = %task.id, subject = %task.subject, "created task");
        Ok(task)
    }

    /// Merge `patch` into the task with `id`.
    ///
    /// The merged task must still have a title and subject.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let idx = self.index_of(id)?;
        let mut task = self.tasks[idx].clone();

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(subject) = patch.subject {
            task.subject = subject.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(edits) = patch.sub_tasks {
            task.sub_tasks = self.rebuild_sub_tasks(&task.sub_tasks, edits);
        }
        validate_task(&task)?;

        let mut next = self.tasks.clone();
        next[idx] = task.clone();
        self.commit(next)?;
        debug!(task_id = %id, "updated task");
        Ok(task)
    }

    /// Remove a task. Deleting an id that does not exist succeeds without a write.
    pub fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            debug!(task_id = %id, "delete of unknown task ignored");
            return Ok(());
        }
        let next: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.commit(next)?;
        debug!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Flip `completed` on a task. Subtasks and stats are not touched.
    pub fn toggle_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self.index_of(id)?;
        let mut next = self.tasks.clone();
        next[idx].completed = !next[idx].completed;
        let task = next[idx].clone();
        self.commit(next)?;
        debug!(task_id = %id, completed = task.completed, "toggled task");
        Ok(task)
    }

    /// Append a subtask to the end of a task's checklist.
    pub fn add_sub_task(&mut self, task_id: &str, title: &str) -> Result<SubTask, StoreError> {
        let idx = self.index_of(task_id)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::message("subtask title must not be blank").into());
        }

        let siblings = &self.tasks[idx].sub_tasks;
        let sub_id = self.fresh_id(|c| siblings.iter().any(|s| s.id == c));
        let sub_task = SubTask {
            id: sub_id,
            title: title.to_string(),
            completed: false,
        };

        let mut next = self.tasks.clone();
        next[idx].sub_tasks.push(sub_task.clone());
        self.commit(next)?;
        debug!(task_id = %task_id, sub_task_id = %sub_task.id, "added subtask");
        Ok(sub_task)
    }

    /// Flip `completed` on one subtask. The parent's own flag is left alone.
    pub fn toggle_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> Result<(), StoreError> {
        let idx = self.index_of(task_id)?;
        let mut next = self.tasks.clone();
        let sub = next[idx]
            .sub_task_mut(sub_task_id)
            .ok_or_else(|| StoreError::sub_task_not_found(sub_task_id))?;
        sub.completed = !sub.completed;
        let completed = sub.completed;
        self.commit(next)?;
        debug!(task_id = %task_id, sub_task_id = %sub_task_id, completed, "toggled subtask");
        Ok(())
    }

    /// Remove one subtask from a task.
    pub fn delete_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> Result<(), StoreError> {
        let idx = self.index_of(task_id)?;
        if self.tasks[idx].sub_task(sub_task_id).is_none() {
            return Err(StoreError::sub_task_not_found(sub_task_id));
        }
        let mut next = self.tasks.clone();
        next[idx].sub_tasks.retain(|s| s.id != sub_task_id);
        self.commit(next)?;
        debug!(task_id = %task_id, sub_task_id = %sub_task_id, "deleted subtask");
        Ok(())
    }

    /// Persist a new streak value, then adopt it.
    pub fn set_streak(&mut self, streak: u32) -> Result<(), StoreError> {
        self.backend.set(STREAK_SLOT, &streak.to_string())?;
        self.streak = streak;
        debug!(streak, "stored streak");
        Ok(())
    }

    /// Persist a new monthly goal. Zero is rejected.
    pub fn set_monthly_goal(&mut self, goal: u32) -> Result<(), StoreError> {
        if goal == 0 {
            return Err(ValidationError::message("monthly goal must be greater than zero").into());
        }
        self.backend.set(GOAL_SLOT, &goal.to_string())?;
        self.monthly_goal = goal;
        debug!(goal, "stored monthly goal");
        Ok(())
    }

    /// Wipe every slot and reset to an empty session.
    ///
    /// Slots are removed one at a time and memory follows each removal, so
    /// a failure part way leaves memory matching what is still stored.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(TASKS_SLOT)?;
        self.tasks.clear();
        self.backend.remove(STREAK_SLOT)?;
        self.streak = 0;
        self.backend.remove(GOAL_SLOT)?;
        self.monthly_goal = DEFAULT_MONTHLY_GOAL;
        info!("cleared task store");
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::task_not_found(id))
    }

    /// Write `next` as the whole collection, then make it current.
    fn commit(&mut self, next: Vec<Task>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next).map_err(|source| PersistenceError::Encode {
            slot: TASKS_SLOT.to_string(),
            source,
        })?;
        if let Err(e) = self.backend.set(TASKS_SLOT, &json) {
            warn!(error = %e, "task write failed, keeping previous collection");
            return Err(e.into());
        }
        self.tasks = next;
        Ok(())
    }

    /// Draw ids until one is not `taken`.
    fn fresh_id(&self, taken: impl Fn(&str) -> bool) -> String {
        for _ in 0..MAX_ID_DRAWS {
            let id = self.ids.next_id();
            if !taken(&id) {
                return id;
            }
        }
        let base = self.ids.next_id();
        let mut n = 2u64;
        loop {
            let id = format!("{base}-{n}");
            if !taken(&id) {
                warn!(id = %id, "id generator kept colliding, using suffixed id");
                return id;
            }
            n += 1;
        }
    }

    /// Apply an edited subtask list: known ids survive, the rest are new.
    fn rebuild_sub_tasks(&self, current: &[SubTask], edits: Vec<SubTaskEdit>) -> Vec<SubTask> {
        let known: HashSet<&str> = current.iter().map(|s| s.id.as_str()).collect();
        let mut kept: HashSet<String> = HashSet::new();
        let edits: Vec<SubTaskEdit> = edits
            .into_iter()
            .filter(|e| !e.title.trim().is_empty())
            .map(|mut e| {
                let keep = e
                    .id
                    .as_deref()
                    .is_some_and(|id| known.contains(id) && !kept.contains(id));
                if keep {
                    if let Some(ref id) = e.id {
                        kept.insert(id.clone());
                    }
                } else {
                    e.id = None;
                }
                e
            })
            .collect();

        let mut out: Vec<SubTask> = Vec::with_capacity(edits.len());
        for edit in edits {
            let id = match edit.id {
                Some(id) => id,
                None => self.fresh_id(|c| kept.contains(c) || out.iter().any(|s| s.id == c)),
            };
            out.push(SubTask {
                id,
                title: edit.title.trim().to_string(),
                completed: edit.completed,
            });
        }
        out
    }
}

fn load_tasks(backend: &dyn KeyValueStore) -> Result<Vec<Task>, PersistenceError> {
    match backend.get(TASKS_SLOT)? {
        None => Ok(Vec::new()),
        Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| PersistenceError::Decode {
            slot: TASKS_SLOT.to_string(),
            source,
        }),
    }
}

fn load_scalar(backend: &dyn KeyValueStore, slot: &str, default: u32) -> Result<u32, PersistenceError> {
    let Some(raw) = backend.get(slot)? else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) => Ok(n),
        Err(e) => {
            warn!(slot, value = %raw, error = %e, "unparsable scalar slot, using default");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::fields::{Field, Priority};
    use crate::ids::SequentialIds;
    use crate::storage::MemoryStore;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Store, MemoryStore, FixedClock) {
        let backend = MemoryStore::new();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
        let store = Store::open(backend.clone(), clock.clone(), SequentialIds::new("t")).unwrap();
        (store, backend, clock)
    }

    /// Always yields the same id, to exercise collision handling.
    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn next_id(&self) -> String {
            "same".to_string()
        }
    }

    #[test]
    fn test_create_prepends_and_stamps() {
        let (mut store, backend, clock) = setup();
        let a = store.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();
        clock.advance(chrono::Duration::minutes(5));
        let b = store.create_task(TaskDraft::new("Optics", "Physics", date(2025, 1, 5))).unwrap();

        assert_ne!(a.id, b.id);
        assert!(!a.completed);
        assert_eq!(a.priority, Priority::Medium);
        assert_eq!(a.created_at, Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
        assert_eq!(b.created_at, Utc.with_ymd_and_hms(2025, 1, 2, 9, 5, 0).unwrap());

        let order: Vec<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec![b.id.as_str(), a.id.as_str()]);

        let stored: Vec<Task> = serde_json::from_str(&backend.raw(TASKS_SLOT).unwrap()).unwrap();
        assert_eq!(stored, store.tasks());
    }

    #[test]
    fn test_create_rejects_invalid_draft_without_writing() {
        let (mut store, backend, _) = setup();
        let draft = TaskDraft {
            title: "Essay".into(),
            subject: " ".into(),
            due_date: None,
            ..TaskDraft::default()
        };
        let err = store.create_task(draft).unwrap_err();
        match err {
            StoreError::Validation(v) => assert_eq!(v.missing, vec![Field::Subject, Field::DueDate]),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.tasks().is_empty());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_create_assigns_sub_task_ids_and_drops_blank_titles() {
        let (mut store, _, _) = setup();
        let draft = TaskDraft::new("Lab report", "Chemistry", date(2025, 2, 1))
            .with_sub_task("Collect data")
            .with_sub_task("   ")
            .with_sub_task(" Write up ");
        let task = store.create_task(draft).unwrap();
        let titles: Vec<&str> = task.sub_tasks.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Collect data", "Write up"]);
        assert_ne!(task.sub_tasks[0].id, task.sub_tasks[1].id);
        assert!(task.sub_tasks.iter().all(|s| !s.completed));
    }

    #[test]
    fn test_colliding_generator_still_yields_fresh_ids() {
        let backend = MemoryStore::new();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
        let mut store = Store::open(backend, clock, StuckIds).unwrap();
        let a = store.create_task(TaskDraft::new("A", "Math", date(2025, 1, 10))).unwrap();
        let b = store.create_task(TaskDraft::new("B", "Math", date(2025, 1, 10))).unwrap();
        let c = store.create_task(TaskDraft::new("C", "Math", date(2025, 1, 10))).unwrap();
        assert_eq!(a.id, "same");
        assert_eq!(b.id, "same-2");
        assert_eq!(c.id, "same-3");
    }

    #[test]
    fn test_update_merges_and_keeps_identity() {
        let (mut store, _, clock) = setup();
        let task = store.create_task(TaskDraft::new("Essay", "History", date(2025, 1, 10))).unwrap();
        clock.advance(chrono::Duration::days(3));

        let updated = store
            .update_task(
                &task.id,
                TaskPatch {
                    title: Some("Final essay".into()),
                    priority: Some(Priority::High),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, task.id);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(updated.title, "Final essay");
        assert_eq!(updated.subject, "History");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(store.get(&task.id), Some(&updated));
    }

    #[test]
    fn test_update_rejects_blank_title_and_unknown_id() {
        let (mut store, backend, _) = setup();
        let task = store.create_task(TaskDraft::new("Essay", "History", date(2025, 1, 10))).unwrap();
        let writes = backend.write_count();

        let err = store
            .update_task(
                &task.id,
                TaskPatch {
                    title: Some("  ".into()),
                    ..TaskPatch::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(&task.id).unwrap().title, "Essay");

        let err = store.update_task("nope", TaskPatch::default()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_update_replaces_sub_task_list() {
        let (mut store, _, _) = setup();
        let task = store
            .create_task(
                TaskDraft::new("Project", "CS", date(2025, 3, 1))
                    .with_sub_task("Design")
                    .with_sub_task("Build"),
            )
            .unwrap();
        let design = task.sub_tasks[0].clone();

        let mut edits: Vec<SubTaskEdit> = vec![SubTaskEdit::from(&design)];
        edits[0].completed = true;
        edits.push(SubTaskEdit {
            id: None,
            title: "Test".into(),
            completed: false,
        });
        // Unknown ids are treated as new entries.
        edits.push(SubTaskEdit {
            id: Some("bogus".into()),
            title: "Ship".into(),
            completed: false,
        });

        let updated = store
            .update_task(
                &task.id,
                TaskPatch {
                    sub_tasks: Some(edits),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        let titles: Vec<&str> = updated.sub_tasks.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Design", "Test", "Ship"]);
        assert_eq!(updated.sub_tasks[0].id, design.id);
        assert!(updated.sub_tasks[0].completed);
        assert_ne!(updated.sub_tasks[2].id, "bogus");
        let ids: HashSet<&str> = updated.sub_tasks.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (mut store, backend, _) = setup();
        let task = store.create_task(TaskDraft::new("Essay", "History", date(2025, 1, 10))).unwrap();
        store.delete_task(&task.id).unwrap();
        assert!(store.tasks().is_empty());
        let writes = backend.write_count();
        store.delete_task(&task.id).unwrap();
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let (mut store, _, _) = setup();
        let task = store.create_task(TaskDraft::new("Essay", "History", date(2025, 1, 10))).unwrap();
        assert!(store.toggle_task(&task.id).unwrap().completed);
        assert!(!store.toggle_task(&task.id).unwrap().completed);
        assert!(store.toggle_task("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_sub_task_operations() {
        let (mut store, _, _) = setup();
        let task = store.create_task(TaskDraft::new("Reading", "Literature", date(2025, 1, 10))).unwrap();

        let first = store.add_sub_task(&task.id, "Read ch.1").unwrap();
        let second = store.add_sub_task(&task.id, " Read ch.2 ").unwrap();
        assert_eq!(second.title, "Read ch.2");
        assert_ne!(first.id, second.id);

        store.toggle_sub_task(&task.id, &first.id).unwrap();
        let current = store.get(&task.id).unwrap();
        assert!(current.sub_tasks[0].completed);
        assert!(!current.completed);

        store.delete_sub_task(&task.id, &first.id).unwrap();
        let current = store.get(&task.id).unwrap();
        assert_eq!(current.sub_tasks.len(), 1);
        assert_eq!(current.sub_tasks[0].id, second.id);

        assert!(store.add_sub_task(&task.id, "  ").unwrap_err().is_validation());
        assert!(store.add_sub_task("missing", "x").unwrap_err().is_not_found());
        assert!(store.toggle_sub_task(&task.id, &first.id).unwrap_err().is_not_found());
        assert!(store.delete_sub_task("missing", &second.id).unwrap_err().is_not_found());
        assert!(store.delete_sub_task(&task.id, "missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let (mut store, backend, _) = setup();
        let task = store.create_task(TaskDraft::new("Essay", "History", date(2025, 1, 10))).unwrap();
        backend.fail_writes(true);

        assert!(store.toggle_task(&task.id).unwrap_err().is_persistence());
        assert!(!store.get(&task.id).unwrap().completed);

        assert!(store
            .create_task(TaskDraft::new("Other", "Math", date(2025, 1, 11)))
            .unwrap_err()
            .is_persistence());
        assert_eq!(store.tasks().len(), 1);

        assert!(store.set_streak(5).unwrap_err().is_persistence());
        assert_eq!(store.streak(), 0);
    }

    #[test]
    fn test_scalars_load_with_defaults() {
        let backend = MemoryStore::new();
        backend.set(STREAK_SLOT, "7").unwrap();
        backend.set(GOAL_SLOT, "not a number").unwrap();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
        let store = Store::open(backend.clone(), clock.clone(), SequentialIds::default()).unwrap();
        assert_eq!(store.streak(), 7);
        assert_eq!(store.monthly_goal(), DEFAULT_MONTHLY_GOAL);

        backend.set(GOAL_SLOT, "0").unwrap();
        let store = Store::open(backend, clock, SequentialIds::default()).unwrap();
        assert_eq!(store.monthly_goal(), DEFAULT_MONTHLY_GOAL);
    }

    #[test]
    fn test_corrupt_task_slot_refuses_to_open() {
        let backend = MemoryStore::new();
        backend.set(TASKS_SLOT, "{not json").unwrap();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
        let err = Store::open(backend, clock, SequentialIds::default()).err().unwrap();
        assert!(matches!(err, StoreError::Persistence(PersistenceError::Decode { .. })));
    }

    #[test]
    fn test_goal_validation_and_clear() {
        let (mut store, backend, _) = setup();
        assert!(store.set_monthly_goal(0).unwrap_err().is_validation());
        store.set_monthly_goal(12).unwrap();
        assert_eq!(backend.raw(GOAL_SLOT).as_deref(), Some("12"));

        store.create_task(TaskDraft::new("Essay", "History", date(2025, 1, 10))).unwrap();
        store.set_streak(3).unwrap();
        store.clear().unwrap();
        assert!(store.tasks().is_empty());
        assert_eq!(store.streak(), 0);
        assert_eq!(store.monthly_goal(), DEFAULT_MONTHLY_GOAL);
        assert_eq!(backend.raw(TASKS_SLOT), None);
    }

    #[test]
    fn test_partial_clear_keeps_memory_in_step_with_storage() {
        let (mut store, backend, _) = setup();
        store.create_task(TaskDraft::new("Essay", "History", date(2025, 1, 10))).unwrap();
        store.set_streak(3).unwrap();
        store.set_monthly_goal(12).unwrap();
        backend.reject_slot(STREAK_SLOT);

        assert!(store.clear().unwrap_err().is_persistence());
        assert!(store.tasks().is_empty());
        assert_eq!(backend.raw(TASKS_SLOT), None);
        assert_eq!(store.streak(), 3);
        assert_eq!(backend.raw(STREAK_SLOT).as_deref(), Some("3"));
        assert_eq!(store.monthly_goal(), 12);
        assert_eq!(backend.raw(GOAL_SLOT).as_deref(), Some("12"));
    }
}
