//! Error types for resource generation.

use thiserror::Error;

/// Result type alias using DatagenError.
pub type Result<T> = std::result::Result<T, DatagenError>;

/// Main error type for building and generating resources.
#[derive(Error, Debug)]
pub enum DatagenError {
    /// A block state builder was generated without any variants or rules.
    #[error("Block state has no variants")]
    EmptyState,

    /// A condition string could not be parsed into `key=value` clauses.
    #[error("Malformed condition '{condition}': {reason}")]
    MalformedCondition { condition: String, reason: String },

    /// An AND/OR combinator was given no conditions.
    #[error("{0} needs at least one condition")]
    EmptyCombinator(&'static str),

    /// A block state model reference has an empty model path.
    #[error("Block state model reference has an empty model path")]
    EmptyModel,

    /// A selector or multipart rule was given an empty list of models.
    #[error("No models given for {0}")]
    NoModels(String),

    /// A JSON source that must be an object was something else.
    #[error("Expected a JSON object: {0}")]
    NotAnObject(String),

    /// The pack manifest is structurally inconsistent.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Failed to parse or serialize JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A hand-written source file is not valid JSON5.
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatagenError {
    pub(crate) fn malformed(condition: &str, reason: impl Into<String>) -> Self {
        DatagenError::MalformedCondition {
            condition: condition.to_string(),
            reason: reason.into(),
        }
    }
}
