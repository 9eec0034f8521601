// src/exec/poller.rs

use tracing::{debug, error, info};

use crate::errors::ClusterError;
use crate::exec::backend::ClusterBackend;
use crate::exec::status::{JobCounters, JobStatus};

/// Query the scheduler once and classify the job's current state.
///
/// Errors are returned as-is; deciding whether they matter is up to the
/// caller.
pub async fn poll_status<B: ClusterBackend + ?Sized>(
    backend: &B,
    namespace: &str,
    job_name: &str,
) -> Result<JobStatus, ClusterError> {
    let counters: JobCounters = backend.job_counters(namespace, job_name).await?;
    let status = JobStatus::classify(counters);

    debug!(
        job = %job_name,
        active = counters.active,
        succeeded = counters.succeeded,
        failed = counters.failed,
        %status,
        "polled job status"
    );

    match status {
        JobStatus::Succeeded => info!(job = %job_name, "job ran successfully"),
        JobStatus::Failed => error!(job = %job_name, "job failed"),
        JobStatus::NotStarted | JobStatus::Running => {}
    }

    Ok(status)
}
