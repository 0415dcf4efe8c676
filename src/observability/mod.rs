//! File-based structured logging.
//!
//! The plugin logs through `tracing` macros. A `tracing-subscriber` pipeline
//! formats events as plain text and writes them to a rotating file:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → LogSink → FileWriter → cinescope.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `~/.local/share/zellij/cinescope/cinescope.log`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Configurable Level**: `trace_level` plugin option, default `"info"`
//!
//! # Usage
//!
//! ```rust,no_run
//! use cinescope::observability::init_tracing;
//! use cinescope::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("plugin initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer and its `io::Write` adapter

mod file_writer;
mod init;

pub use file_writer::{FileWriter, LogSink};
pub use init::{init_tracing, DEFAULT_LEVEL, LOG_FILE_NAME};
