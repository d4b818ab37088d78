//! Tracing subscriber setup
//!
//! Log lines go to a file or to stderr. Stdout is reserved for the menu.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{filter::ParseError, fmt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("Failed to create log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Global subscriber already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Filter from `RUST_LOG` if it is set and valid, otherwise `default`.
pub fn env_filter(default: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default)?),
    }
}

/// Build a subscriber writing formatted events to `writer`.
pub fn build_subscriber<W>(
    filter: EnvFilter,
    writer: W,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer().with_writer(writer).with_ansi(ansi);

    tracing_subscriber::registry().with(fmt_layer).with(filter)
}

/// Install the global subscriber, logging to `log_file` or stderr.
pub fn init_global(default_filter: &str, log_file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = env_filter(default_filter)?;

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            build_subscriber(filter, Arc::new(file), false).try_init()?;
        }
        None => {
            build_subscriber(filter, io::stderr, true).try_init()?;
        }
    }

    Ok(())
}
