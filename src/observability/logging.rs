//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick writer (stderr or log file) and format (pretty or JSON)
//!
//! # Design Decisions
//! - Level precedence: `--log-level`, then `RUST_LOG`, then `logging.level`
//! - Log files are appended to; parent directories are created

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::schema::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot open log file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logging already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Build the level filter.
///
/// An explicit `level_override` wins, then `RUST_LOG`, then `configured`.
pub fn build_filter(level_override: Option<&str>, configured: &str) -> Result<EnvFilter, LoggingError> {
    if level_override.is_none() {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
    }

    let level = level_override.unwrap_or(configured);
    EnvFilter::try_new(level).map_err(|source| LoggingError::Filter {
        filter: level.to_string(),
        source,
    })
}

/// Install the global subscriber.
///
/// `level_override` comes from the command line.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> Result<(), LoggingError> {
    let filter = build_filter(level_override, &config.level)?;
    let level = level_override.unwrap_or(&config.level);

    let layer = match &config.file {
        Some(path) => {
            let file = open_log_file(Path::new(path))?;
            format_layer(config.format, Mutex::new(file), false)
        }
        None => format_layer(config.format, io::stderr, true),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()?;

    tracing::debug!(level, file = ?config.file, format = ?config.format, "Logging initialized");
    Ok(())
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer().with_writer(writer).with_ansi(ansi).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    }
}

fn open_log_file(path: &Path) -> Result<fs::File, LoggingError> {
    let to_error = |source: io::Error| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    OpenOptions::new().create(true).append(true).open(path).map_err(to_error)
}
