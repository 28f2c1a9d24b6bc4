//! Command implementations for the CLI interface.
//!
//! Each subcommand resolves user-typed identifiers, calls one tracker
//! operation, and prints the result. Errors bubble up to `main`.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::display::*;
use crate::fields::{Priority, StatusFilter, SubjectFilter};
use crate::query::{distinct_subjects, filter_tasks, resolve_sub_task, resolve_task};
use crate::task::{TaskDraft, TaskPatch};
use crate::tracker::Tracker;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Subject or course, e.g. "Math".
        #[arg(long, short)]
        subject: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday", "in 3d", ...
        #[arg(long, short)]
        due: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, short, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Initial subtask. May be repeated.
        #[arg(long = "sub")]
        sub_tasks: Vec<String>,
    },

    /// List tasks, most recent first.
    List {
        /// Completion filter.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Exact subject, or "all".
        #[arg(long, default_value = "all")]
        subject: SubjectFilter,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one task with its subtasks.
    View {
        /// Task id, id prefix, or title.
        id: String,
    },

    /// Change fields on a task.
    Update {
        /// Task id, id prefix, or title.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },

    /// Mark a task done, or pending again.
    Toggle {
        /// Task id, id prefix, or title.
        id: String,
    },

    /// Delete a task. Unknown ids are ignored.
    Delete {
        /// Task id, id prefix, or title.
        id: String,
    },

    /// Manage the subtasks of a task.
    Sub {
        #[command(subcommand)]
        action: SubAction,
    },

    /// List distinct subjects.
    Subjects,

    /// Show totals, streak and monthly goal progress.
    Stats {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or set the monthly completion goal.
    Goal {
        /// New goal; must be greater than zero.
        value: Option<u32>,
    },

    /// Delete all tasks and reset streak and goal.
    Reset {
        /// Confirm the reset.
        #[arg(long)]
        yes: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SubAction {
    /// Append a subtask.
    Add {
        /// Parent task id, id prefix, or title.
        task: String,
        /// Subtask title.
        title: String,
    },
    /// Mark a subtask done, or pending again.
    Toggle {
        task: String,
        /// Subtask id, id prefix, or title.
        sub: String,
    },
    /// Give a subtask a new title.
    Rename {
        task: String,
        /// Subtask id, id prefix, or title.
        sub: String,
        /// New title.
        title: String,
    },
    /// Remove a subtask.
    Delete {
        task: String,
        /// Subtask id, id prefix, or title.
        sub: String,
    },
}

fn parse_due(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match parse_due_input(input, today) {
        Some(d) => Ok(d),
        None => bail!("could not understand due date '{input}'"),
    }
}

pub fn cmd_ui(tracker: &mut Tracker) -> Result<()> {
    run_tui(tracker).context("dashboard failed")
}

/// Add a new task.
pub fn cmd_add(
    tracker: &mut Tracker,
    title: String,
    subject: Option<String>,
    due: Option<String>,
    priority: Priority,
    desc: Option<String>,
    sub_tasks: Vec<String>,
) -> Result<()> {
    let today = tracker.today();
    let due_date = due.as_deref().map(|d| parse_due(d, today)).transpose()?;
    let draft = TaskDraft {
        title,
        subject: subject.unwrap_or_default(),
        description: desc.unwrap_or_default(),
        priority,
        due_date,
        sub_tasks,
    };
    let task = tracker.create_task(draft)?;
    println!("Added task {} ({})", task.id, task.title);
    Ok(())
}

/// List tasks with status and subject filters.
pub fn cmd_list(
    tracker: &Tracker,
    status: StatusFilter,
    subject: SubjectFilter,
    limit: Option<usize>,
) -> Result<()> {
    let mut rows = filter_tasks(tracker.tasks(), status, &subject);
    if rows.is_empty() {
        if tracker.tasks().is_empty() {
            println!("No tasks yet. Add one with `st add`.");
        } else {
            println!("No tasks match your filters.");
        }
        return Ok(());
    }
    if let Some(n) = limit {
        rows.truncate(n);
    }
    print_table(&rows, tracker.today());
    Ok(())
}

pub fn cmd_view(tracker: &Tracker, id: String) -> Result<()> {
    let task_id = resolve_task(&id, tracker.tasks())?;
    if let Some(task) = tracker.store().get(&task_id) {
        print_task(task, tracker.today());
    }
    Ok(())
}

/// Update fields on a task.
pub fn cmd_update(
    tracker: &mut Tracker,
    id: String,
    title: Option<String>,
    subject: Option<String>,
    desc: Option<String>,
    due: Option<String>,
    priority: Option<Priority>,
) -> Result<()> {
    let task_id = resolve_task(&id, tracker.tasks())?;
    let today = tracker.today();
    let patch = TaskPatch {
        title,
        subject,
        description: desc,
        priority,
        due_date: due.as_deref().map(|d| parse_due(d, today)).transpose()?,
        ..TaskPatch::default()
    };
    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    let task = tracker.update_task(&task_id, patch)?;
    println!("Updated {} ({})", task.id, task.title);
    Ok(())
}

pub fn cmd_toggle(tracker: &mut Tracker, id: String) -> Result<()> {
    let task_id = resolve_task(&id, tracker.tasks())?;
    let outcome = tracker.toggle_task(&task_id)?;
    if outcome.completed_now {
        println!(
            "Completed '{}'. Streak: {}",
            outcome.task.title, outcome.streak
        );
        let stats = tracker.stats();
        if stats.goal_reached() {
            println!(
                "Monthly goal reached: {}/{}",
                stats.this_month_completed, stats.monthly_goal
            );
        }
    } else {
        println!("Reopened '{}'", outcome.task.title);
    }
    Ok(())
}

pub fn cmd_delete(tracker: &mut Tracker, id: String) -> Result<()> {
    match resolve_task(&id, tracker.tasks()) {
        Ok(task_id) => {
            tracker.delete_task(&task_id)?;
            println!("Deleted {task_id}");
        }
        Err(e) if e.is_not_found() => println!("No task matches '{id}'; nothing deleted."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub fn cmd_sub(tracker: &mut Tracker, action: SubAction) -> Result<()> {
    match action {
        SubAction::Add { task, title } => {
            let task_id = resolve_task(&task, tracker.tasks())?;
            let sub = tracker.add_sub_task(&task_id, &title)?;
            println!("Added subtask {} ({})", sub.id, sub.title);
        }
        SubAction::Toggle { task, sub } => {
            let (task_id, sub_id) = resolve_pair(tracker, &task, &sub)?;
            tracker.toggle_sub_task(&task_id, &sub_id)?;
            println!("Toggled subtask {sub_id}");
        }
        SubAction::Rename { task, sub, title } => {
            let (task_id, sub_id) = resolve_pair(tracker, &task, &sub)?;
            tracker.rename_sub_task(&task_id, &sub_id, &title)?;
            println!("Renamed subtask {sub_id} to '{}'", title.trim());
        }
        SubAction::Delete { task, sub } => {
            let (task_id, sub_id) = resolve_pair(tracker, &task, &sub)?;
            tracker.delete_sub_task(&task_id, &sub_id)?;
            println!("Deleted subtask {sub_id}");
        }
    }
    Ok(())
}

fn resolve_pair(tracker: &Tracker, task: &str, sub: &str) -> Result<(String, String)> {
    let task_id = resolve_task(task, tracker.tasks())?;
    let Some(parent) = tracker.store().get(&task_id) else {
        bail!("task {task_id} disappeared");
    };
    let sub_id = resolve_sub_task(sub, parent)?;
    Ok((task_id, sub_id))
}

/// List all distinct subjects with their task counts.
pub fn cmd_subjects(tracker: &Tracker) -> Result<()> {
    let subjects = distinct_subjects(tracker.tasks());
    if subjects.is_empty() {
        println!("No subjects yet.");
        return Ok(());
    }
    println!("{:<16} {}", "Subject", "Count");
    for s in subjects {
        let count = tracker.tasks().iter().filter(|t| t.subject == s).count();
        println!("{:<16} {}", truncate(&s, 16), count);
    }
    Ok(())
}

pub fn cmd_stats(tracker: &Tracker, json: bool) -> Result<()> {
    let stats = tracker.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }
    Ok(())
}

pub fn cmd_goal(tracker: &mut Tracker, value: Option<u32>) -> Result<()> {
    if let Some(goal) = value {
        tracker.set_monthly_goal(goal)?;
    }
    let stats = tracker.stats();
    println!(
        "Monthly goal: {} ({} done, {}%)",
        stats.monthly_goal,
        stats.this_month_completed,
        stats.goal_progress()
    );
    Ok(())
}

pub fn cmd_reset(tracker: &mut Tracker, yes: bool) -> Result<()> {
    if !yes {
        bail!("refusing to reset without --yes");
    }
    tracker.clear()?;
    println!("All tasks deleted; streak and goal reset.");
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
