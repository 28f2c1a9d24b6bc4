//! # studytrack
//!
//! Core of an academic task tracker: tasks grouped by subject, with
//! priorities, due dates and subtasks, plus a completion streak and a
//! monthly completion goal.
//!
//! State lives behind the [`storage::KeyValueStore`] trait. The clock and id
//! source are injected too, so the whole core runs deterministically in tests.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use studytrack::{clock::SystemClock, ids::RandomIds, storage::FileStore};
//! use studytrack::{task::TaskDraft, tracker::Tracker};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::open("/tmp/studytrack")?;
//! let mut tracker = Tracker::open(store, SystemClock, RandomIds)?;
//! let due = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! let task = tracker.create_task(TaskDraft::new("Algebra homework", "Math", due))?;
//! let outcome = tracker.toggle_task(&task.id)?;
//! println!("streak is now {}", outcome.streak);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod clock;
pub mod cmd;
pub mod config;
pub mod display;
pub mod error;
pub mod fields;
pub mod ids;
pub mod logging;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;
pub mod tracker;

pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}
