// src/exec/job_spec.rs

//! Job manifest construction for a stage.

use std::collections::BTreeMap;

use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::EnvVar;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::artifact::ArtifactPath;
use crate::config::model::StageConfig;
use crate::errors::{CascadeError, Result};

/// `app` label value shared by every job of a scenario.
pub const SCENARIO_LABEL_VALUE: &str = "Cascade";

/// Environment for a stage's container.
///
/// The stage configuration comes first (sorted by key), followed by the
/// variables derived from `artifact`. Configuration keys that clash with a
/// derived variable are left out so the derived value is the only one.
pub fn stage_env(stage: &StageConfig, artifact: &ArtifactPath) -> Vec<EnvVar> {
    let injected = artifact.injected_env();

    let mut env: Vec<EnvVar> = stage
        .configuration
        .iter()
        .filter(|(key, _)| !injected.iter().any(|(name, _)| name == key))
        .map(|(key, value)| env_var(key, value))
        .collect();

    env.extend(injected.iter().map(|(name, value)| env_var(name, value)));
    env
}

/// Labels attached to a stage's job.
pub fn job_labels(stage: &StageConfig) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app".to_string(), SCENARIO_LABEL_VALUE.to_string()),
        ("modulename".to_string(), stage.module_name.clone()),
    ])
}

/// Build the Job submitted for `stage`.
///
/// The template is copied as-is except for the first container's `env`,
/// which is replaced by [`stage_env`]. Policy fields are passed through.
pub fn build_job(stage: &StageConfig, artifact: &ArtifactPath, namespace: &str) -> Result<Job> {
    let mut template = stage.template.clone();

    let container = template
        .spec
        .as_mut()
        .and_then(|spec| spec.containers.first_mut())
        .ok_or_else(|| CascadeError::InvalidTemplate {
            module: stage.module_name.clone(),
            reason: "template.spec.containers is empty".to_string(),
        })?;
    container.env = Some(stage_env(stage, artifact));

    Ok(Job {
        metadata: ObjectMeta {
            name: Some(stage.module_name.clone()),
            namespace: Some(namespace.to_string()),
            labels: Some(job_labels(stage)),
            ..ObjectMeta::default()
        },
        spec: Some(JobSpec {
            template,
            ttl_seconds_after_finished: stage.ttl_seconds_after_finished,
            backoff_limit: stage.backoff_limit,
            active_deadline_seconds: stage.active_deadline_seconds,
            ..JobSpec::default()
        }),
        ..Job::default()
    })
}

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..EnvVar::default()
    }
}
