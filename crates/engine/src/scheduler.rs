//! Batched, bounded-concurrency upload passes.
//!
//! A pass partitions its tasks into consecutive chunks of the configured
//! batch width. Chunks run strictly sequentially; within a chunk every
//! upload is dispatched concurrently and the pass waits for the whole
//! chunk before moving on. In-flight operations are therefore bounded by
//! the batch width, and memory by one chunk plus the residual list.

use std::time::Instant;

use cdnlift_backend::StorageBackend;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::reporter::{Phase, ProgressSink, ProgressUpdate};
use crate::types::{RunState, UploadOutcome, UploadTask};

/// Drives one pass over `tasks`, mutating `state` at chunk join points.
///
/// Per-file failures are absorbed: logged, collected, and returned as the
/// residual list in the order they were recorded. They never abort the
/// chunk or the pass.
pub(crate) async fn run_pass(
    tasks: &[UploadTask],
    bucket: &str,
    batch: usize,
    phase: Phase,
    backend: &dyn StorageBackend,
    state: &mut RunState,
    reporter: &dyn ProgressSink,
) -> Vec<UploadTask> {
    let mut failures = Vec::new();

    for chunk in tasks.chunks(batch) {
        let uploads = chunk.iter().map(|task| upload_one(task, bucket, backend));
        let outcomes = join_all(uploads).await;

        // Join point: all uploads in this chunk have completed. Counter
        // mutation and reporting happen only here, on the control task.
        for outcome in outcomes {
            if outcome.success {
                debug!(
                    file = %outcome.task.file_name,
                    key = %outcome.task.destination_key,
                    attempt = outcome.task.attempt,
                    duration_ms = outcome.duration_ms,
                    "uploaded"
                );
                state.uploaded_count += 1;
            } else {
                warn!(
                    file = %outcome.task.file_name,
                    attempt = outcome.task.attempt,
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "upload failed, queued for retry"
                );
                failures.push(outcome.task);
            }
        }

        reporter.update(ProgressUpdate {
            uploaded: state.uploaded_count,
            failed: state.pending_retries.len() + failures.len(),
            total: state.total_candidates,
            phase,
        });
    }

    failures
}

/// One upload attempt: sign, transfer, record wall-clock duration.
async fn upload_one(task: &UploadTask, bucket: &str, backend: &dyn StorageBackend) -> UploadOutcome {
    let token = backend.sign(bucket, &task.destination_key);

    let begin = Instant::now();
    let result = backend
        .upload(&token, &task.destination_key, &task.source_path)
        .await;
    let duration_ms = begin.elapsed().as_millis() as u64;

    match result {
        Ok(_receipt) => UploadOutcome {
            task: task.clone(),
            success: true,
            duration_ms,
            error: None,
        },
        Err(e) => UploadOutcome {
            task: task.clone(),
            success: false,
            duration_ms,
            error: Some(e.to_string()),
        },
    }
}
