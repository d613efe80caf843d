//! Progress sink contract.
//!
//! The engine drives a [`ProgressSink`] from its single control task:
//! updates fire only at chunk join points, never from two in-flight
//! uploads concurrently, and [`finish`](ProgressSink::finish) is called
//! exactly once after orchestration concludes, before the completion
//! signal resolves.

use crate::error::DeployError;

/// Which pass the run is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First pass over the candidate set.
    Initial,
    /// Re-driving residual failures under the retry budget.
    Retrying,
}

/// Aggregate counters delivered to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub uploaded: usize,
    /// Files currently waiting in the retry queue.
    pub failed: usize,
    pub total: usize,
    pub phase: Phase,
}

impl ProgressUpdate {
    /// Uploaded percentage. An empty run is complete by definition.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            100
        } else {
            (self.uploaded * 100 / self.total) as u8
        }
    }
}

/// Sink for aggregate upload progress.
pub trait ProgressSink: Send + Sync {
    /// Called with updated counters at each chunk join point.
    fn update(&self, progress: ProgressUpdate);

    /// Called exactly once after the run concludes. `error` is `None` on
    /// success; implementations render a terminal success/failure mark.
    fn finish(&self, error: Option<&DeployError>);
}

/// Sink that ignores all updates. Useful when embedding without a UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn update(&self, _progress: ProgressUpdate) {}
    fn finish(&self, _error: Option<&DeployError>) {}
}
