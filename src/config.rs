//! Runtime configuration: where data lives and how loud logging is.

use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "STUDYTRACK_DIR";

/// Directory name used under `$HOME` when nothing else is configured.
pub const DEFAULT_DIR_NAME: &str = ".studytrack";

/// Log verbosity requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub verbosity: Verbosity,
}

impl Config {
    /// Use `data_dir` when given (flag or env), else `$HOME/.studytrack`,
    /// falling back to `./.studytrack` when `HOME` is unset.
    pub fn resolve(data_dir: Option<PathBuf>, verbosity: Verbosity) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(DEFAULT_DIR_NAME)
        });
        Self {
            data_dir,
            verbosity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let cfg = Config::resolve(Some(PathBuf::from("/tmp/st")), Verbosity::Normal);
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/st"));
    }

    #[test]
    fn test_default_dir_name() {
        let cfg = Config::resolve(None, Verbosity::Normal);
        assert!(cfg.data_dir.ends_with(DEFAULT_DIR_NAME));
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }
}
