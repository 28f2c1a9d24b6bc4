//! # st - study task tracker
//!
//! Command-line front end and terminal dashboard for the `studytrack` core.
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task due on Friday with two subtasks
//! st add "Lab report" --subject Chemistry --due friday --sub "Write intro" --sub "Plot data"
//!
//! # See what is still pending in one subject
//! st list --status pending --subject Chemistry
//!
//! # Tick it off and watch the streak grow
//! st toggle "Lab report"
//!
//! # Or do all of that interactively
//! st ui
//! ```
//!
//! Data is stored in `~/.studytrack/` as one JSON file per slot
//! (`studentTasks.json`, `currentStreak.json`, `monthlyGoal.json`).
//! Set `STUDYTRACK_DIR` or pass `--data-dir` to use another directory.

use clap::Parser;

use studytrack::cli::Cli;
use studytrack::clock::SystemClock;
use studytrack::cmd::*;
use studytrack::config::{Config, Verbosity};
use studytrack::ids::RandomIds;
use studytrack::logging;
use studytrack::storage::FileStore;
use studytrack::tracker::Tracker;

fn main() {
    let cli = Cli::parse();
    let verbosity = match (&cli.command, Verbosity::from_flags(cli.verbose, cli.quiet)) {
        // Log lines would draw over the dashboard.
        (Commands::Ui, Verbosity::Normal) => Verbosity::Quiet,
        (_, v) => v,
    };
    let config = Config::resolve(cli.data_dir, verbosity);
    logging::init(config.verbosity);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    // Completions never touch the data directory.
    if let Commands::Completions { shell } = command {
        cmd_completions(shell);
        return Ok(());
    }

    let store = FileStore::open(&config.data_dir)?;
    let mut tracker = Tracker::open(store, SystemClock, RandomIds)?;

    match command {
        Commands::Ui => cmd_ui(&mut tracker),
        Commands::Add {
            title,
            subject,
            due,
            priority,
            desc,
            sub_tasks,
        } => cmd_add(&mut tracker, title, subject, due, priority, desc, sub_tasks),
        Commands::List {
            status,
            subject,
            limit,
        } => cmd_list(&tracker, status, subject, limit),
        Commands::View { id } => cmd_view(&tracker, id),
        Commands::Update {
            id,
            title,
            subject,
            desc,
            due,
            priority,
        } => cmd_update(&mut tracker, id, title, subject, desc, due, priority),
        Commands::Toggle { id } => cmd_toggle(&mut tracker, id),
        Commands::Delete { id } => cmd_delete(&mut tracker, id),
        Commands::Sub { action } => cmd_sub(&mut tracker, action),
        Commands::Subjects => cmd_subjects(&tracker),
        Commands::Stats { json } => cmd_stats(&tracker, json),
        Commands::Goal { value } => cmd_goal(&mut tracker, value),
        Commands::Reset { yes } => cmd_reset(&mut tracker, yes),
        Commands::Completions { .. } => Ok(()),
    }
}
