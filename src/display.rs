//! Formatting and parsing helpers shared by the CLI and the dashboard.
//!
//! Due-date parsing accepts ISO dates and a handful of human phrases; the
//! formatters turn tasks and stats into fixed-width terminal rows.

use chrono::{Datelike, Duration, NaiveDate};

use crate::fields::Priority;
use crate::query::{is_overdue, sub_task_progress};
use crate::stats::Stats;
use crate::task::Task;

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow"
/// - "monday".."sunday" (and "mon".."sun"), "next <weekday>"
/// - "end of week" / "eow", "end of month" / "eom"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "end of week" | "eow" => return Some(end_of_week(today)),
        "end of month" | "eom" => {
            let (y, m) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let first_of_next = NaiveDate::from_ymd_opt(y, m, 1)?;
            return Some(first_of_next - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        // Offsets past chrono's date range parse to None.
        if let Some(n) = rest.strip_suffix('d').and_then(|n| n.trim().parse::<i64>().ok()) {
            return Duration::try_days(n).and_then(|d| today.checked_add_signed(d));
        }
        if let Some(n) = rest.strip_suffix('w').and_then(|n| n.trim().parse::<i64>().ok()) {
            return Duration::try_weeks(n).and_then(|d| today.checked_add_signed(d));
        }
    }

    let (next_week, day) = match s.strip_prefix("next ") {
        Some(day) => (true, day.trim()),
        None => (false, s.as_str()),
    };
    if let Some(target) = weekday_index(day) {
        let current = today.weekday().num_days_from_monday() as i64;
        let ahead = (target + 7 - current) % 7;
        let days = if next_week {
            if ahead == 0 { 7 } else { ahead + 7 }
        } else {
            ahead
        };
        return Some(today + Duration::days(days));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn weekday_index(name: &str) -> Option<i64> {
    let idx = match name {
        "monday" | "mon" => 0,
        "tuesday" | "tue" => 1,
        "wednesday" | "wed" => 2,
        "thursday" | "thu" => 3,
        "friday" | "fri" => 4,
        "saturday" | "sat" => 5,
        "sunday" | "sun" => 6,
        _ => return None,
    };
    Some(idx)
}

/// Sunday of the ISO week containing `today`.
pub fn end_of_week(today: NaiveDate) -> NaiveDate {
    let weekday = today.weekday().num_days_from_monday() as i64;
    today + Duration::days(6 - weekday)
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

pub fn format_status(completed: bool) -> &'static str {
    if completed {
        "Done"
    } else {
        "Pending"
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// `"2/3"` style subtask counter, or `"-"` when there are none.
pub fn format_progress(task: &Task) -> String {
    match sub_task_progress(task) {
        (_, 0) => "-".into(),
        (done, total) => format!("{done}/{total}"),
    }
}

/// Print tasks as a fixed-width table.
pub fn print_table(tasks: &[&Task], today: NaiveDate) {
    println!(
        "{:<9} {:<8} {:<7} {:<12} {:<14} {:<5} {}",
        "ID", "Status", "Pri", "Due", "Subject", "Subs", "Title"
    );
    for t in tasks {
        let due = format_due_relative(t.due_date, today);
        let flag = if is_overdue(t, today) { " !" } else { "" };
        println!(
            "{:<9} {:<8} {:<7} {:<12} {:<14} {:<5} {}{}",
            truncate(&t.id, 9),
            format_status(t.completed),
            format_priority(t.priority),
            due,
            truncate(&t.subject, 14),
            format_progress(t),
            t.title,
            flag
        );
    }
}

/// Print every field of one task, subtasks included.
pub fn print_task(task: &Task, today: NaiveDate) {
    println!("ID:          {}", task.id);
    println!("Title:       {}", task.title);
    println!("Subject:     {}", task.subject);
    println!("Priority:    {}", format_priority(task.priority));
    println!(
        "Due:         {} ({}){}",
        task.due_date,
        format_due_relative(task.due_date, today),
        if is_overdue(task, today) { " OVERDUE" } else { "" }
    );
    println!("Status:      {}", format_status(task.completed));
    println!("Created:     {}", task.created_at.format("%Y-%m-%d %H:%M UTC"));
    if !task.description.is_empty() {
        println!("Description: {}", task.description);
    }
    if !task.sub_tasks.is_empty() {
        println!("Subtasks ({}):", format_progress(task));
        for s in &task.sub_tasks {
            println!("  [{}] {}  ({})", if s.completed { "x" } else { " " }, s.title, s.id);
        }
    }
}

/// Print the dashboard numbers.
pub fn print_stats(stats: &Stats) {
    println!("Total:      {}", stats.total_tasks);
    println!("Pending:    {}", stats.pending_tasks);
    println!("Completed:  {}", stats.completed_tasks);
    println!("Streak:     {}", stats.current_streak);
    println!(
        "This month: {}/{} ({}%){}",
        stats.this_month_completed,
        stats.monthly_goal,
        stats.goal_progress(),
        if stats.goal_reached() { "  goal reached" } else { "" }
    );
}
