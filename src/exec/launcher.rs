// src/exec/launcher.rs

use tracing::{error, info};

use crate::artifact::ArtifactPath;
use crate::config::model::StageConfig;
use crate::errors::{CascadeError, Result};
use crate::exec::backend::ClusterBackend;
use crate::exec::job_spec::build_job;

/// Build the job for `stage` and submit it to `namespace`.
///
/// Any error here means the scenario cannot go on; the sequencer propagates
/// it and the process exits.
pub async fn launch_stage<B: ClusterBackend + ?Sized>(
    backend: &B,
    namespace: &str,
    stage: &StageConfig,
    artifact: &ArtifactPath,
) -> Result<()> {
    let job = build_job(stage, artifact, namespace)?;

    info!(
        module = %stage.module_name,
        stage = artifact.stage_num(),
        %namespace,
        last_stage = artifact.is_last_stage(),
        "submitting stage job"
    );

    if let Err(source) = backend.create_job(namespace, job).await {
        error!(
            module = %stage.module_name,
            error = %source,
            "failed to create job"
        );
        return Err(CascadeError::Submit {
            module: stage.module_name.clone(),
            source,
        });
    }

    info!(module = %stage.module_name, "created job successfully");
    Ok(())
}
