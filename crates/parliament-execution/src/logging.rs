//! Subscriber setup.
//!
//! `RUST_LOG` wins over the configured level. Human-readable output goes
//! to stderr; when a log directory is given a daily-rolling file is
//! written there as well.

use crate::tracing_layer::{CouncilEvent, CouncilEventLayer};
use parliament_core::config::LoggingConfig;
use parliament_core::error::{ParliamentError, Result};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_PREFIX: &str = "parliament.log";

#[derive(Debug, Default)]
pub struct LoggingOptions {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for the rolling log file; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
    /// Observer for council events (`--trace`).
    pub events: Option<mpsc::UnboundedSender<CouncilEvent>>,
}

impl LoggingOptions {
    /// Options from the `[logging]` section. `logs_dir` is used only when
    /// file logging is enabled.
    pub fn from_config(config: &LoggingConfig, logs_dir: Option<PathBuf>) -> Self {
        Self {
            level: config.level.clone(),
            log_dir: if config.file { logs_dir } else { None },
            events: None,
        }
    }

    pub fn with_events(mut self, sender: mpsc::UnboundedSender<CouncilEvent>) -> Self {
        self.events = Some(sender);
        self
    }
}

/// Keeps the file writer flushing; hold it until the process exits.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Builds the filter from `RUST_LOG`, else from `level`, else `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(options: LoggingOptions) -> Result<LoggingGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, file_guard) = match options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let event_layer = options.events.map(CouncilEventLayer::new);

    tracing_subscriber::registry()
        .with(env_filter(&options.level))
        .with(stderr_layer)
        .with(file_layer)
        .with(event_layer)
        .try_init()
        .map_err(|e| ParliamentError::config(format!("Failed to initialize logging: {e}")))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
