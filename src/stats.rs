//! Dashboard statistics.
//!
//! Counts are recomputed from the task collection on every call; only the
//! streak and the monthly goal are stored.

use chrono::Datelike;
use serde::Serialize;

use crate::clock::Clock;
use crate::task::Task;

/// Snapshot of the dashboard numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_tasks: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    pub current_streak: u32,
    pub monthly_goal: u32,
    /// Completed tasks created in the current calendar month.
    pub this_month_completed: usize,
}

impl Stats {
    /// Percentage of the monthly goal reached, capped at 100.
    pub fn goal_progress(&self) -> u32 {
        if self.monthly_goal == 0 {
            return 0;
        }
        let pct = self.this_month_completed as u64 * 100 / self.monthly_goal as u64;
        pct.min(100) as u32
    }

    pub fn goal_reached(&self) -> bool {
        self.this_month_completed as u64 >= self.monthly_goal as u64
    }
}

/// Compute stats from the collection and the two stored scalars.
///
/// The month test uses `created_at`: tasks carry no completion timestamp.
/// Calendar months are those of the clock's time zone.
pub fn compute_stats(tasks: &[Task], streak: u32, monthly_goal: u32, clock: &dyn Clock) -> Stats {
    let today = clock.today();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();
    let this_month_completed = tasks
        .iter()
        .filter(|t| t.completed)
        .filter(|t| {
            let created = clock.local_date(t.created_at);
            created.year() == today.year() && created.month() == today.month()
        })
        .count();
    Stats {
        total_tasks: tasks.len(),
        pending_tasks: tasks.len() - completed_tasks,
        completed_tasks,
        current_streak: streak,
        monthly_goal,
        this_month_completed,
    }
}

/// Streak after a task's completion flag moved from `was` to `now`.
///
/// Only an incomplete → complete transition counts; un-completing never
/// lowers the streak.
pub fn next_streak(streak: u32, was_completed: bool, now_completed: bool) -> u32 {
    if !was_completed && now_completed {
        streak.saturating_add(1)
    } else {
        streak
    }
}
