//! Pooled-budget retry passes over residual failures.
//!
//! The budget is shared across all failing files: `failures × max_retry_times`
//! attempts, computed once when retries begin. A file that recovers on its
//! first retry returns its unused attempts to the pool; no file is
//! guaranteed `max_retry_times` attempts of its own.

use cdnlift_backend::StorageBackend;
use tracing::info;

use crate::error::DeployError;
use crate::reporter::{Phase, ProgressSink};
use crate::scheduler;
use crate::types::{RunState, UploadTask};

/// Re-drives `state.pending_retries` until the queue empties or the
/// budget is exhausted. Returns the number of retry passes performed.
///
/// Each pass draws `min(batch, budget_remaining)` tasks from the queue
/// front, decrements the budget by the number drawn (not by failures),
/// and feeds fresh failures back onto the queue end.
pub(crate) async fn retry_failures(
    state: &mut RunState,
    bucket: &str,
    batch: usize,
    max_retry_times: u32,
    backend: &dyn StorageBackend,
    reporter: &dyn ProgressSink,
) -> Result<u32, DeployError> {
    if state.pending_retries.is_empty() {
        return Ok(0);
    }

    state.retry_budget_remaining = state.pending_retries.len() * max_retry_times as usize;
    let mut passes = 0u32;

    while !state.pending_retries.is_empty() {
        if state.retry_budget_remaining == 0 {
            let failed: Vec<String> = state
                .pending_retries
                .iter()
                .map(|t| t.file_name.clone())
                .collect();
            return Err(DeployError::RetryExhausted { failed });
        }

        let draw = batch
            .min(state.retry_budget_remaining)
            .min(state.pending_retries.len());

        let mut pass_tasks: Vec<UploadTask> = Vec::with_capacity(draw);
        while pass_tasks.len() < draw {
            let Some(mut task) = state.pending_retries.pop_front() else {
                break;
            };
            task.attempt += 1;
            pass_tasks.push(task);
        }

        state.retry_budget_remaining -= pass_tasks.len();
        passes += 1;
        info!(
            pass = passes,
            drawn = pass_tasks.len(),
            budget_remaining = state.retry_budget_remaining,
            queued = state.pending_retries.len(),
            "retry pass"
        );

        let failures = scheduler::run_pass(
            &pass_tasks,
            bucket,
            batch,
            Phase::Retrying,
            backend,
            state,
            reporter,
        )
        .await;

        for task in failures {
            state.pending_retries.push_back(task);
        }
    }

    Ok(passes)
}
