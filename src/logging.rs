//! Tracing subscriber setup.
//!
//! The chat view owns stdout, so log records go to `CINEBOT_LOG_FILE` when set and to stderr
//! otherwise.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", path.display())]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Builds the filter from `CINEBOT_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn env_filter(raw: Option<&str>) -> EnvFilter {
    let Some(raw) = raw else {
        return EnvFilter::new(DEFAULT_LOG_FILTER);
    };

    match EnvFilter::try_new(raw) {
        Ok(filter) => filter,
        Err(error) => {
            eprintln!(
                "WARN: CINEBOT_LOG='{raw}' is not a valid tracing filter ({error}); falling back to '{DEFAULT_LOG_FILTER}'"
            );
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    }
}

/// Installs the global tracing subscriber.
pub fn init_logging(config: &EnvConfig) -> Result<(), LoggingError> {
    let filter = env_filter(config.log_filter.as_deref());

    match config.log_file.as_deref() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::OpenLogFile {
                    path: PathBuf::from(path),
                    source,
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|error| LoggingError::Install(error.to_string()))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|error| LoggingError::Install(error.to_string())),
    }
}
