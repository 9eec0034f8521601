// src/config/model.rs

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::PodTemplateSpec;
use serde::{Deserialize, Serialize};

use crate::artifact::ARTIFACT_ENV;

/// One stage of a scenario, as read from the scenario file.
///
/// ```json
/// {
///   "moduleName": "ingest",
///   "configuration": { "s3path": "bucket/pkg.tgz" },
///   "template": { "spec": { "containers": [ { "name": "ingest", "image": "ingest:1" } ] } },
///   "backoffLimit": 0
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    /// Job name, and the key used in status messages and logs.
    pub module_name: String,

    /// Pod template for the job. Only the first container's `env` is
    /// replaced before submission.
    pub template: PodTemplateSpec,

    /// Stage parameters, passed to the container as env vars.
    ///
    /// On stage 0, `s3path` is the scenario's input artifact.
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,

    #[serde(default, alias = "ttlAfterFinished")]
    pub ttl_seconds_after_finished: Option<i32>,

    #[serde(default)]
    pub backoff_limit: Option<i32>,

    #[serde(default)]
    pub active_deadline_seconds: Option<i64>,
}

impl StageConfig {
    /// The `s3path` entry of this stage's configuration, if any.
    pub fn artifact_seed(&self) -> Option<&str> {
        self.configuration.get(ARTIFACT_ENV).map(String::as_str)
    }
}

/// Scenario file contents before validation: a JSON array of stages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawScenarioConfig {
    pub stages: Vec<StageConfig>,
}

/// Validated scenario, in execution order.
///
/// Construct through `ScenarioConfig::try_from(raw)` or
/// [`crate::config::load_and_validate`].
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    stages: Vec<StageConfig>,
}

impl ScenarioConfig {
    pub(crate) fn new_unchecked(stages: Vec<StageConfig>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[StageConfig] {
        &self.stages
    }

    pub fn into_stages(self) -> Vec<StageConfig> {
        self.stages
    }
}
