use thiserror::Error;

use crate::models::EventKind;

/// Malformed input rejected at the boundary, before classification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Minute out of range: {minute} (expected 0-120)")]
    MinuteOutOfRange { minute: i64 },

    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Empty name in field '{field}'")]
    EmptyName { field: &'static str },

    #[error("Event kind {kind:?} requires a player name")]
    MissingActor { kind: EventKind },

    #[error("Invalid request: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Problems with a template catalog file. Raised only while loading.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Catalog language mismatch: file declares '{found}', expected '{expected}'")]
    LanguageMismatch { found: String, expected: String },

    #[error("Catalog '{language}' has no neutral pool for {key}")]
    MissingNeutralPool { language: String, key: String },

    #[error("Catalog '{language}' has no {tone} pool for {key}")]
    MissingTonePool { language: String, key: String, tone: String },

    #[error("Catalog '{language}' must not define a {tone} pool for {key}")]
    UnexpectedTonePool { language: String, key: String, tone: String },

    #[error("Catalog '{language}' uses unknown placeholder '{{{placeholder}}}' in: {body}")]
    UnknownPlaceholder { language: String, placeholder: String, body: String },

    #[error("Catalog '{language}' entry sets a card color only valid for card events: {body}")]
    MalformedEntry { language: String, body: String },

    #[error("Catalog '{language}' has an empty {field}")]
    EmptyField { language: String, field: &'static str },
}

/// Failure of a commentary backend. Only the hosted seam produces these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Transient backend failure: {0}")]
    Transient(String),

    #[error("Permanent backend failure: {0}")]
    Permanent(String),

    #[error("Backend timed out")]
    Timeout,
}

impl BackendError {
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Transient(_) => true,
            BackendError::Timeout => true,
            BackendError::Permanent(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum CommentaryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CommentaryError>;
