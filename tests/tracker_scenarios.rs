//! End-to-end scenarios over the public tracker API.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use studytrack::clock::FixedClock;
use studytrack::fields::{StatusFilter, SubjectFilter};
use studytrack::ids::SequentialIds;
use studytrack::query::{distinct_subjects, filter_tasks};
use studytrack::storage::{FileStore, MemoryStore, STREAK_SLOT, TASKS_SLOT};
use studytrack::task::{TaskDraft, TaskPatch};
use studytrack::tracker::Tracker;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap())
}

fn tracker_on(backend: &MemoryStore, prefix: &str) -> Tracker {
    Tracker::open(backend.clone(), clock(), SequentialIds::new(prefix)).unwrap()
}

#[test]
fn test_newest_task_comes_first_and_subjects_are_distinct() {
    let backend = MemoryStore::new();
    let mut tracker = tracker_on(&backend, "t");

    let a = tracker.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();
    let b = tracker.create_task(TaskDraft::new("Optics", "Physics", date(2025, 1, 5))).unwrap();

    let ids: Vec<&str> = tracker.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![b.id.as_str(), a.id.as_str()]);

    let subjects: Vec<String> = distinct_subjects(tracker.tasks()).into_iter().collect();
    assert_eq!(subjects, vec!["Math".to_string(), "Physics".to_string()]);
}

#[test]
fn test_streak_grows_on_completion_and_survives_reopen() {
    let backend = MemoryStore::new();
    let mut tracker = tracker_on(&backend, "t");
    let a = tracker.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();

    tracker.toggle_task(&a.id).unwrap();
    assert_eq!(tracker.stats().current_streak, 1);
    assert_eq!(backend.raw(STREAK_SLOT).as_deref(), Some("1"));

    tracker.toggle_task(&a.id).unwrap();
    assert_eq!(tracker.stats().current_streak, 1);

    tracker.toggle_task(&a.id).unwrap();
    let reopened = tracker_on(&backend, "u");
    assert_eq!(reopened.stats().current_streak, 2);
    assert!(reopened.tasks()[0].completed);
}

#[test]
fn test_sub_task_completion_does_not_complete_parent() {
    let backend = MemoryStore::new();
    let mut tracker = tracker_on(&backend, "t");
    let a = tracker.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();

    let sub = tracker.add_sub_task(&a.id, "Read ch.1").unwrap();
    tracker.toggle_sub_task(&a.id, &sub.id).unwrap();

    let task = &tracker.tasks()[0];
    assert!(task.sub_task(&sub.id).unwrap().completed);
    assert!(!task.completed);
}

#[test]
fn test_update_after_delete_is_not_found() {
    let backend = MemoryStore::new();
    let mut tracker = tracker_on(&backend, "t");
    let a = tracker.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();

    tracker.delete_task(&a.id).unwrap();
    let patch = TaskPatch {
        title: Some("Geometry".into()),
        ..TaskPatch::default()
    };
    let err = tracker.update_task(&a.id, patch).unwrap_err();
    assert!(err.is_not_found());
    assert!(tracker.tasks().is_empty());
}

#[test]
fn test_pending_filter_keeps_order() {
    let backend = MemoryStore::new();
    let mut tracker = tracker_on(&backend, "t");
    let mut ids = Vec::new();
    for title in ["One", "Two", "Three", "Four"] {
        ids.push(tracker.create_task(TaskDraft::new(title, "Math", date(2025, 1, 10))).unwrap().id);
    }
    tracker.toggle_task(&ids[1]).unwrap();

    let pending: Vec<&str> = filter_tasks(tracker.tasks(), StatusFilter::Pending, &SubjectFilter::All)
        .into_iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(pending, vec!["Four", "Three", "One"]);
}

#[test]
fn test_month_progress_uses_creation_month() {
    let backend = MemoryStore::new();
    let clock = clock();
    let mut tracker = Tracker::open(backend.clone(), clock.clone(), SequentialIds::new("t")).unwrap();
    let a = tracker.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();
    tracker.toggle_task(&a.id).unwrap();
    assert_eq!(tracker.stats().this_month_completed, 1);

    // Completed in February, created in January: no longer counted.
    clock.advance(Duration::days(31));
    let b = tracker.create_task(TaskDraft::new("Optics", "Physics", date(2025, 2, 10))).unwrap();
    tracker.toggle_task(&b.id).unwrap();
    let stats = tracker.stats();
    assert_eq!(stats.completed_tasks, 2);
    assert_eq!(stats.this_month_completed, 1);
    assert_eq!(stats.current_streak, 2);
}

#[test]
fn test_two_sessions_from_one_snapshot_last_write_wins() {
    let backend = MemoryStore::new();
    let mut first = tracker_on(&backend, "a");
    let mut second = tracker_on(&backend, "b");

    first.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();
    second.create_task(TaskDraft::new("Optics", "Physics", date(2025, 1, 5))).unwrap();

    let fresh = tracker_on(&backend, "c");
    let titles: Vec<&str> = fresh.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Optics"]);
}

#[test]
fn test_failed_write_surfaces_and_keeps_state() {
    let backend = MemoryStore::new();
    let mut tracker = tracker_on(&backend, "t");
    let a = tracker.create_task(TaskDraft::new("Algebra", "Math", date(2025, 1, 10))).unwrap();

    backend.fail_writes(true);
    let err = tracker.toggle_task(&a.id).unwrap_err();
    assert!(err.is_persistence());
    assert!(!tracker.tasks()[0].completed);
    assert_eq!(tracker.stats().current_streak, 0);

    backend.fail_writes(false);
    assert!(tracker.toggle_task(&a.id).unwrap().completed_now);
}

#[test]
fn test_file_backed_session_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let due = date(2025, 1, 10);
    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut tracker = Tracker::open(store, clock(), SequentialIds::new("t")).unwrap();
        let a = tracker
            .create_task(TaskDraft::new("Lab report", "Chemistry", due).with_sub_task("Plot data"))
            .unwrap();
        tracker.toggle_task(&a.id).unwrap();
        tracker.set_monthly_goal(5).unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let raw = std::fs::read_to_string(store.slot_path(TASKS_SLOT)).unwrap();
    assert!(raw.contains("\"dueDate\":\"2025-01-10\""));
    assert!(raw.contains("\"subTasks\""));

    let tracker = Tracker::open(store, clock(), SequentialIds::new("u")).unwrap();
    let stats = tracker.stats();
    assert_eq!(stats.total_tasks, 1);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.monthly_goal, 5);
    assert_eq!(stats.goal_progress(), 20);
    assert_eq!(tracker.tasks()[0].sub_tasks.len(), 1);
}
