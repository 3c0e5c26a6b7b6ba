//! Telemetry and Observability
//!
//! Structured logging setup driven by [`LoggingSettings`].

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, LoggingSettings};
use crate::shared::error::{Result, SettingsError};

/// Log file name prefix inside `logging.directory`.
pub const LOG_FILE_PREFIX: &str = "provider-settings.log";

/// Keeps the background log file writer alive. Drop it only at shutdown.
#[must_use = "log file output stops when the guard is dropped"]
#[derive(Debug, Default)]
pub struct TelemetryGuard {
    _file_writer: Option<WorkerGuard>,
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("{level},provider_settings={level}")
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(logging: &LoggingSettings) -> Result<TelemetryGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(&logging.level)))
        .map_err(|e| SettingsError::Telemetry(e.to_string()))?;

    let stdout_layer = match logging.format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
    };

    let (file_layer, file_writer) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SettingsError::Telemetry(e.to_string()))?;

    tracing::info!(
        level = %logging.level,
        format = ?logging.format,
        "Tracing initialized"
    );
    Ok(TelemetryGuard {
        _file_writer: file_writer,
    })
}
