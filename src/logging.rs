//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Filter directive for a verbosity level when `RUST_LOG` is not set.
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "studytrack=debug,st=debug",
    }
}

/// Install a stderr subscriber. `-v`/`-q` override `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: Verbosity) {
    let filter = match verbosity {
        Verbosity::Normal => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity))),
        _ => EnvFilter::new(default_directive(verbosity)),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives() {
        assert_eq!(default_directive(Verbosity::Quiet), "error");
        assert_eq!(default_directive(Verbosity::Normal), "warn");
        assert!(default_directive(Verbosity::Verbose).contains("debug"));
    }
}
