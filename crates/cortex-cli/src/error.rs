//! Error types for cortex-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the convergence engine
    #[error(transparent)]
    Core(#[from] cortex_core::Error),

    /// Error from the engine client (connection config, transport)
    #[error(transparent)]
    Client(#[from] cortex_client::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The desired-state manifest could not be parsed
    #[error("Cannot parse manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
