#![forbid(unsafe_code)]

//! `tracing` subscriber setup.
//!
//! The interactive stepper owns the terminal, so it never logs to it: events
//! go to a log file when one is configured and are dropped otherwise. The
//! `trace` command writes its output to stdout and logs to stderr.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{AppError, Result};

/// Where log events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Disabled,
}

impl LogTarget {
    /// Interactive sessions log to a file or nowhere.
    #[must_use]
    pub fn interactive(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Disabled, |path| Self::File(path.to_path_buf()))
    }

    /// Batch commands log to a file when given, stderr otherwise.
    #[must_use]
    pub fn batch(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Stderr, |path| Self::File(path.to_path_buf()))
    }
}

/// Install the global subscriber for `target`, filtered by `directives`.
pub fn init_logging(directives: &str, target: &LogTarget) -> Result<()> {
    let filter = build_filter(directives)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true),
                )
                .try_init()
        }
    };

    installed.map_err(|error| AppError::Logging {
        message: error.to_string(),
    })?;
    tracing::debug!(?target, directives, "logging initialised");
    Ok(())
}

/// Parse filter directives such as `info` or `longdiv=debug,longdiv_core=trace`.
pub fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|error| AppError::Logging {
        message: format!("invalid log filter {directives:?}: {error}"),
    })
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_selection() {
        let path = Path::new("run.log");
        assert_eq!(LogTarget::interactive(None), LogTarget::Disabled);
        assert_eq!(LogTarget::batch(None), LogTarget::Stderr);
        assert_eq!(
            LogTarget::interactive(Some(path)),
            LogTarget::File(path.to_path_buf())
        );
        assert_eq!(LogTarget::batch(Some(path)), LogTarget::File(path.to_path_buf()));
    }

    #[test]
    fn filter_directives_are_validated() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("longdiv=debug,longdiv_core=trace").is_ok());
        assert!(matches!(
            build_filter("longdiv=loud"),
            Err(AppError::Logging { .. })
        ));
    }

    #[test]
    fn log_file_is_created_in_append_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("longdiv.log");
        std::fs::write(&path, "existing\n").unwrap();
        let file = open_log_file(&path).unwrap();
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing\n");
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("longdiv.log");
        let error = open_log_file(&path).unwrap_err();
        assert!(matches!(error, AppError::LogFile { .. }));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn disabled_target_installs_nothing() {
        assert!(init_logging("info", &LogTarget::Disabled).is_ok());
    }
}
