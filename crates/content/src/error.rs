use thiserror::Error;

/// Failures raised while loading or validating season content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The embedded JSON could not be deserialized.
    #[error("malformed season content: {0}")]
    Parse(#[from] serde_json::Error),
    /// The data parsed but breaks a league rule (positions, scoring, names).
    #[error("inconsistent season content: {0}")]
    Inconsistent(String),
}
