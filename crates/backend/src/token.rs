//! Upload scopes, tokens, and backend credentials.

use std::fmt;

use serde::Deserialize;

/// Formats the authorization scope for one object: `bucket:key`.
pub fn upload_scope(bucket: &str, key: &str) -> String {
    format!("{bucket}:{key}")
}

/// A signed, scoped upload authorization.
///
/// Produced by [`StorageBackend::sign`](crate::StorageBackend::sign) and
/// handed back verbatim to `upload`. The engine never inspects `payload`;
/// its format is whatever the backend's signer emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadToken {
    /// `bucket:key` scope this token authorizes.
    pub scope: String,
    /// Opaque signed payload.
    pub payload: String,
}

impl UploadToken {
    /// Creates a token for `scope` carrying an opaque signed `payload`.
    pub fn new(scope: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            payload: payload.into(),
        }
    }
}

/// Backend credentials and region, passed through to the backend untouched.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    /// Storage region/zone hint. `None` lets the backend auto-detect.
    #[serde(default)]
    pub zone: Option<String>,
}

// Keep the secret out of logs and error chains.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("zone", &self.zone)
            .finish()
    }
}
