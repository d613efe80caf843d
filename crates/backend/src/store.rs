//! The storage backend trait.
//!
//! `StorageBackend` is implemented by the embedding application on top of
//! the actual vendor SDK or HTTP client. Using a trait keeps the upload
//! orchestration decoupled from transport and testable with mocks.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::{BackendError, UploadToken};

/// Boxed future returned by [`StorageBackend::upload`].
pub type UploadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<UploadReceipt, BackendError>> + Send + 'a>>;

/// Metadata returned by the backend for one successful upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Destination key the object was stored under.
    pub key: String,
    /// Content hash reported by the backend, if any.
    pub hash: Option<String>,
}

/// Abstract object-storage/CDN backend.
///
/// Implementations must tolerate concurrent `upload` invocations up to the
/// engine's configured batch width; if the underlying client is not safe
/// for concurrent use, the implementation must pool or serialize
/// internally.
pub trait StorageBackend: Send + Sync {
    /// Builds a signed upload token scoped to `bucket:key`.
    ///
    /// Synchronous and pure with respect to credentials + scope; called
    /// once per upload attempt.
    fn sign(&self, bucket: &str, key: &str) -> UploadToken;

    /// Performs one upload attempt of the file at `source_path` to `key`.
    fn upload(&self, token: &UploadToken, key: &str, source_path: &Path) -> UploadFuture<'_>;
}
