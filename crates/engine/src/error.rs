//! Deploy error types.

/// Errors produced by the deploy engine.
///
/// Per-file upload failures are not represented here; they are absorbed
/// into the retry queue and only surface as [`RetryExhausted`] once the
/// attempt budget runs out.
///
/// [`RetryExhausted`]: DeployError::RetryExhausted
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("unresolved placeholder in upload path: {token}")]
    UnresolvedPlaceholder { token: String },

    #[error("upload failed permanently for {} file(s): {}", .failed.len(), .failed.join(", "))]
    RetryExhausted { failed: Vec<String> },
}
