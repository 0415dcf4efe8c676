//! Error types for the Cinescope plugin.
//!
//! This module defines the centralized error type [`CinescopeError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Remote failures are split into three kinds that callers treat identically (no
//! retry for a single user action) but log differently:
//!
//! - [`CinescopeError::Config`]: no API credential, no request was attempted
//! - [`CinescopeError::Network`]: the request never produced an HTTP response
//! - [`CinescopeError::Upstream`]: the service answered with a non-success status

use thiserror::Error;

/// The main error type for Cinescope plugin operations.
///
/// # Examples
///
/// ```
/// use cinescope::CinescopeError;
///
/// let err = CinescopeError::Upstream { status: 401 };
/// assert_eq!(err.to_string(), "Upstream error: TMDB returned status 401");
/// assert_eq!(err.status(), Some(401));
/// ```
#[derive(Debug, Error)]
pub enum CinescopeError {
    /// Configuration is invalid or missing.
    ///
    /// Raised before any request is built when the API credential is absent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure (DNS, offline, TLS, host refused the request).
    #[error("Network error: {0}")]
    Network(String),

    /// The metadata service answered with a non-success status.
    #[error("Upstream error: TMDB returned status {status}")]
    Upstream {
        /// HTTP status code of the response.
        status: u16,
    },

    /// A success response whose body is not the expected JSON document.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CinescopeError {
    /// Returns the HTTP status carried by [`CinescopeError::Upstream`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Cinescope operations.
pub type Result<T> = std::result::Result<T, CinescopeError>;
