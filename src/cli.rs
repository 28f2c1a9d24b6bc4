use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::config::DATA_DIR_ENV;

/// Academic task tracker with subjects, subtasks, a streak and a monthly goal.
/// Data lives in ~/.studytrack unless --data-dir or STUDYTRACK_DIR says otherwise.
#[derive(Parser)]
#[command(name = "st", version, about = "Study task tracker")]
pub struct Cli {
    /// Directory holding the task, streak and goal files.
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}
