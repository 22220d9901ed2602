//! Error types for the flowdag crates.
//!
//! The layout engine itself never fails: malformed graphs degrade to
//! best-effort output. Errors only surface where input crosses into the
//! crate, i.e. when a graph is deserialized or layout parameters are read
//! from configuration.

/// Errors raised while decoding a [`crate::WorkflowGraph`].
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The graph payload was not valid JSON for the workflow schema.
    #[error("invalid workflow graph JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading or validating [`crate::LayoutParams`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid layout config: {0}")]
    Parse(String),

    /// A field holds a value the layout engine cannot use.
    #[error("invalid layout parameter `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
