//! Deploy orchestrator: one run per completed build.
//!
//! [`Deployer`] validates the configuration up front, then drives the
//! pipeline (resolve, select, first upload pass, retries) and finalizes
//! the progress sink before producing the run's single verdict. The
//! [`drive`](Deployer::drive) form wraps the run for host build tools
//! that expect a completion signal: a one-shot channel resolved exactly
//! once, after all upload and retry activity concludes.

use std::sync::Arc;

use cdnlift_backend::StorageBackend;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::error::DeployError;
use crate::reporter::{Phase, ProgressSink, ProgressUpdate};
use crate::types::{BuildContext, RunState, RunSummary, UploadTask};
use crate::{retry, scheduler, select, template};

/// Orchestrates asset uploads for one build.
#[derive(Debug)]
pub struct Deployer {
    config: UploadConfig,
    filter: select::SelectionFilter,
}

impl Deployer {
    /// Validates `config` and builds a deployer.
    ///
    /// Configuration errors (zero batch width, malformed filter pattern)
    /// surface here, before any I/O.
    pub fn new(config: UploadConfig) -> Result<Self, DeployError> {
        let filter = config.validate()?;
        Ok(Self { config, filter })
    }

    /// Runs the full deploy pipeline for one build.
    ///
    /// The progress sink is always finalized with a success or failure
    /// glyph before this returns. Per-file failures never surface here; the
    /// only error outcomes are template resolution and retry exhaustion.
    pub async fn run(
        &self,
        ctx: &BuildContext,
        backend: &dyn StorageBackend,
        reporter: &dyn ProgressSink,
    ) -> Result<RunSummary, DeployError> {
        let result = self.run_inner(ctx, backend, reporter).await;
        reporter.finish(result.as_ref().err());
        result
    }

    /// The build-hook form: spawns the run and resolves the returned
    /// channel exactly once when it concludes, never before.
    ///
    /// Consumes the deployer; the host invokes it once per build. There
    /// is no cancellation: an in-flight batch always runs to completion.
    pub fn drive(
        self,
        ctx: BuildContext,
        backend: Arc<dyn StorageBackend>,
        reporter: Arc<dyn ProgressSink>,
    ) -> oneshot::Receiver<Result<RunSummary, DeployError>> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = self.run(&ctx, backend.as_ref(), reporter.as_ref()).await;
            // The host may have dropped the receiver; the run itself
            // already concluded either way.
            let _ = tx.send(result);
        });
        rx
    }

    async fn run_inner(
        &self,
        ctx: &BuildContext,
        backend: &dyn StorageBackend,
        reporter: &dyn ProgressSink,
    ) -> Result<RunSummary, DeployError> {
        // Resolve once; every task shares the prefix.
        let resolved = template::resolve(&self.config.path, &ctx.build_hash)?;

        let candidates = select::select(&ctx.assets, &self.filter);
        debug!(
            emitted = ctx.assets.len(),
            selected = candidates.len(),
            path = %resolved,
            "selected upload candidates"
        );

        let tasks: Vec<UploadTask> = candidates
            .iter()
            .map(|asset| UploadTask::new(asset, &resolved))
            .collect();

        let mut state = RunState::new(tasks.len());
        reporter.update(ProgressUpdate {
            uploaded: 0,
            failed: 0,
            total: state.total_candidates,
            phase: Phase::Initial,
        });

        let failures = scheduler::run_pass(
            &tasks,
            &self.config.bucket,
            self.config.batch,
            Phase::Initial,
            backend,
            &mut state,
            reporter,
        )
        .await;
        state.pending_retries = failures.into();

        let retry_passes = retry::retry_failures(
            &mut state,
            &self.config.bucket,
            self.config.batch,
            self.config.max_retry_times,
            backend,
            reporter,
        )
        .await?;

        info!(
            uploaded = state.uploaded_count,
            total = state.total_candidates,
            retry_passes,
            bucket = %self.config.bucket,
            "deploy complete"
        );

        Ok(RunSummary {
            total: state.total_candidates,
            uploaded: state.uploaded_count,
            retry_passes,
        })
    }
}
