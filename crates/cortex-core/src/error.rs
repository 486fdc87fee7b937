//! Error types for cortex-core

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can fail a reconciliation cycle
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The desired specification could not be translated into the engine's
    /// native form; fatal for the cycle, never defaulted away
    #[error(transparent)]
    Translation(#[from] cortex_rules::Error),

    /// A remote call failed; the next cycle retries from a clean slate
    #[error(transparent)]
    Remote(#[from] cortex_client::Error),
}
