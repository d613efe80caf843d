//! Asset deploy orchestration engine.
//!
//! Given the file set produced by a completed build, this crate resolves
//! the destination path template, selects the upload candidates, and
//! drives them against an object-storage backend in fixed-size concurrent
//! batches with a pooled retry budget, reporting aggregate progress along
//! the way. It is a library crate with no transport or UI dependencies;
//! the embedding application provides a
//! [`StorageBackend`](cdnlift_backend::StorageBackend) implementation and
//! a [`ProgressSink`].
//!
//! # Pipeline
//!
//! 1. **Resolve** — expand `[hash]`/`[hash:N]` tokens in the path template
//! 2. **Select** — filter emitted assets through exclude/include predicates
//! 3. **Upload** — sequential chunks of `batch` concurrent uploads
//! 4. **Retry** — re-drive failures under a shared attempt budget
//! 5. **Finalize** — close the progress line, resolve the completion signal

pub mod config;
pub mod deploy;
pub mod error;
pub mod reporter;
pub mod select;
pub mod template;
pub mod types;

mod retry;
mod scheduler;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export primary types for convenience.
pub use config::UploadConfig;
pub use deploy::Deployer;
pub use error::DeployError;
pub use reporter::{NoopSink, Phase, ProgressSink, ProgressUpdate};
pub use select::{NamePredicate, SelectionFilter, select};
pub use template::{destination_key, resolve};
pub use types::{BuildContext, EmittedAsset, RunState, RunSummary, UploadOutcome, UploadTask};
