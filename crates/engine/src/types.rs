//! Data types for the deploy flow.

use std::collections::VecDeque;
use std::path::PathBuf;

/// One file emitted by the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    /// File name relative to the build output root (forward slashes).
    pub name: String,
    /// Absolute path of the materialized file on disk.
    pub source_path: PathBuf,
    /// Whether the build actually wrote this asset to disk.
    pub emitted: bool,
}

/// Per-build context supplied by the host build tool.
///
/// Asset order is emission order and is preserved through selection and
/// scheduling. Read-only to the engine; nothing persists across builds.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Content hash of the build, substituted into the path template.
    pub build_hash: String,
    pub assets: Vec<EmittedAsset>,
}

impl BuildContext {
    /// Creates an empty context for the given build hash.
    pub fn new(build_hash: impl Into<String>) -> Self {
        Self {
            build_hash: build_hash.into(),
            assets: Vec::new(),
        }
    }
}

/// One file scheduled for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub file_name: String,
    pub source_path: PathBuf,
    /// `resolved_path/file_name`, posix-joined.
    pub destination_key: String,
    /// 1 on the first pass; incremented each time the task re-enters a
    /// retry pass.
    pub attempt: u32,
}

impl UploadTask {
    pub(crate) fn new(asset: &EmittedAsset, resolved_path: &str) -> Self {
        Self {
            file_name: asset.name.clone(),
            source_path: asset.source_path.clone(),
            destination_key: crate::template::destination_key(resolved_path, &asset.name),
            attempt: 1,
        }
    }
}

/// Result of a single upload attempt. Outcomes are never merged; a
/// retried task produces a new outcome.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub task: UploadTask,
    pub success: bool,
    /// Wall-clock duration of the attempt.
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Mutable bookkeeping for one engine run.
///
/// Owned by the scheduler and retry coordinator; only touched between
/// chunks, never while uploads are in flight.
#[derive(Debug)]
pub struct RunState {
    pub total_candidates: usize,
    pub uploaded_count: usize,
    /// FIFO queue of tasks awaiting a retry pass.
    pub pending_retries: VecDeque<UploadTask>,
    pub retry_budget_remaining: usize,
}

impl RunState {
    pub fn new(total_candidates: usize) -> Self {
        Self {
            total_candidates,
            uploaded_count: 0,
            pending_retries: VecDeque::new(),
            retry_budget_remaining: 0,
        }
    }
}

/// Final tally of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub uploaded: usize,
    /// Number of retry passes it took to drain the residual queue.
    pub retry_passes: u32,
}
