//! Object-storage backend interface for asset deployment.
//!
//! The engine talks to the storage/CDN service through exactly two
//! primitives: a synchronous `sign(bucket, key)` producing a scoped
//! [`UploadToken`], and an asynchronous `upload(token, key, source_path)`
//! performing one transfer attempt. Both live behind the [`StorageBackend`]
//! trait so the orchestration logic stays decoupled from any concrete
//! vendor SDK and testable with scripted mocks.
//!
//! Authentication and raw transport (HTTP multipart, TLS) belong to the
//! backend implementation; this crate only defines the seam.

mod store;
mod token;

pub use store::{StorageBackend, UploadFuture, UploadReceipt};
pub use token::{Credentials, UploadToken, upload_scope};

/// Errors produced by a storage backend during a single upload attempt.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}
