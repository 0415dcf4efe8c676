//! Tracing initialization and subscriber setup.
//!
//! Configures a `tracing` subscriber whose formatting layer writes plain-text
//! events to a rotating log file in the plugin's data directory.

use super::file_writer::{FileWriter, LogSink};
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the log inside the data directory.
pub const LOG_FILE_NAME: &str = "cinescope.log";

/// Default filter directive when `trace_level` is not configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file output.
///
/// The filter comes from `config.trace_level`, falling back to `"info"`. An
/// invalid directive also falls back to `"info"`.
///
/// Logs go to `~/.local/share/zellij/cinescope/cinescope.log`, reached through
/// the sandbox's `/host` mount.
///
/// # Initialization Behavior
///
/// - Creates the data directory if needed
/// - Returns silently when the directory cannot be created (logging is optional)
/// - Only the first call installs a subscriber
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = Arc::new(FileWriter::new(data_dir.join(LOG_FILE_NAME)));
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(move || LogSink(Arc::clone(&writer))),
    );

    if subscriber.try_init().is_ok() {
        tracing::debug!(level = %level, "tracing initialized");
    }
}
