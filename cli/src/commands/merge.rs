use std::time::Duration;

use anyhow::Context;
use svcmerge_common::MergeError;
use svcmerge_common::config::Config;
use svcmerge_common::interrupt::Interrupt;
use svcmerge_core::{MergeJob, MergeSummary};
use tokio::task::JoinHandle;
use tracing::{debug, info_span};

/// How long an interrupted worker that has not started staging gets to stop.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub async fn merge(cfg: &Config) -> anyhow::Result<MergeSummary> {
    let job: MergeJob = MergeJob::from_config(cfg);
    let span = info_span!("merge", output = %job.output);
    span.in_scope(|| debug!("Merging {} inputs", job.inputs.len()));

    let interrupt: Interrupt = Interrupt::new();
    let worker_interrupt: Interrupt = interrupt.clone();
    let mut worker: JoinHandle<Result<MergeSummary, MergeError>> =
        tokio::task::spawn_blocking(move || span.in_scope(|| job.run(&worker_interrupt)));

    tokio::select! {
        joined = &mut worker => {
            Ok(joined.context("merge worker stopped unexpectedly")??)
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            interrupt.raise();
            // A worker blocked on input has nothing staged yet. One that is
            // staging must be left to discard its temporary file.
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut worker).await.is_err()
                && interrupt.is_staging()
            {
                debug!("Waiting for staged output to be discarded");
                let _ = worker.await;
            }
            Err(MergeError::Interrupted.into())
        }
    }
}
