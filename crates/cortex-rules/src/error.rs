//! Error types for cortex-rules

/// Result type for rule model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing or translating rule specifications
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Duration text does not follow the engine's duration grammar
    #[error("Invalid duration {text:?}: expected units like 5m, 1h30m, 90s")]
    InvalidDuration { text: String },

    /// A rule sets both `record` and `alert`
    #[error("Rule may set either record or alert, not both")]
    RuleNameConflict,

    /// A rule sets neither `record` nor `alert`
    #[error("Rule must set one of record or alert")]
    MissingRuleName,

    /// A text fragment parsed to something other than a single scalar
    #[error("Expected a scalar value, found a {found}")]
    NotScalar { found: &'static str },

    /// A required scalar fragment is empty
    #[error("Scalar value is empty")]
    EmptyScalar,

    /// YAML error from the underlying parser
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
