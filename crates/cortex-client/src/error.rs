//! Error types for cortex-client

use std::path::PathBuf;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the rules engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured engine address is not usable as a base URL
    #[error("Invalid engine address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Transport-level failure (connect, timeout, TLS)
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The engine answered with a non-success status
    #[error("Engine returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The engine's response body could not be decoded
    #[error("Cannot decode engine response: {0}")]
    Body(#[from] serde_yaml::Error),

    /// Connection config file not found at the expected path
    #[error("Connection config not found at {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// Connection config could not be parsed
    #[error(transparent)]
    ConfigParse(#[from] toml::de::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
