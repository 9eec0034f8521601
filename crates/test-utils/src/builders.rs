#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use cascade::cli::RunSettings;
use cascade::config::{RawScenarioConfig, ScenarioConfig, StageConfig};
use cascade::engine::SequencerOptions;
use k8s_openapi::api::core::v1::{Container, EnvVar, PodSpec, PodTemplateSpec};

/// Builder for `StageConfig`.
///
/// The default template has a single container named after the module with
/// a placeholder env var, so tests can check that it gets replaced.
pub struct StageConfigBuilder {
    stage: StageConfig,
}

impl StageConfigBuilder {
    pub fn new(module_name: &str) -> Self {
        Self {
            stage: StageConfig {
                module_name: module_name.to_string(),
                template: single_container_template(module_name),
                configuration: BTreeMap::new(),
                ttl_seconds_after_finished: None,
                backoff_limit: None,
                active_deadline_seconds: None,
            },
        }
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.stage
            .configuration
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn s3path(self, path: &str) -> Self {
        self.param("s3path", path)
    }

    pub fn template(mut self, template: PodTemplateSpec) -> Self {
        self.stage.template = template;
        self
    }

    pub fn ttl_seconds_after_finished(mut self, ttl: i32) -> Self {
        self.stage.ttl_seconds_after_finished = Some(ttl);
        self
    }

    pub fn backoff_limit(mut self, limit: i32) -> Self {
        self.stage.backoff_limit = Some(limit);
        self
    }

    pub fn active_deadline_seconds(mut self, secs: i64) -> Self {
        self.stage.active_deadline_seconds = Some(secs);
        self
    }

    pub fn build(self) -> StageConfig {
        self.stage
    }
}

/// Builder for a validated `ScenarioConfig`.
pub struct ScenarioBuilder {
    stages: Vec<StageConfig>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, stage: StageConfig) -> Self {
        self.stages.push(stage);
        self
    }

    /// Shorthand for the usual `ingest -> transform -> export` shape, seeded
    /// with `s3path`.
    pub fn linear(seed: &str, names: &[&str]) -> Self {
        let mut builder = Self::new();
        for (idx, name) in names.iter().enumerate() {
            let mut stage = StageConfigBuilder::new(name);
            if idx == 0 {
                stage = stage.s3path(seed);
            }
            builder = builder.with_stage(stage.build());
        }
        builder
    }

    pub fn build_raw(self) -> RawScenarioConfig {
        RawScenarioConfig {
            stages: self.stages,
        }
    }

    pub fn build(self) -> ScenarioConfig {
        ScenarioConfig::try_from(self.build_raw())
            .expect("Failed to build valid scenario from builder")
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Template with one container called `name`, carrying a placeholder env var.
pub fn single_container_template(name: &str) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: None,
        spec: Some(PodSpec {
            containers: vec![Container {
                name: name.to_string(),
                image: Some(format!("registry.local/{name}:latest")),
                env: Some(vec![EnvVar {
                    name: "PLACEHOLDER".to_string(),
                    value: Some("from-template".to_string()),
                    ..EnvVar::default()
                }]),
                ..Container::default()
            }],
            restart_policy: Some("Never".to_string()),
            ..PodSpec::default()
        }),
    }
}

/// Settings for fast test runs: 1ms poll interval, no stage timeout.
pub fn test_settings(scenario_name: &str) -> RunSettings {
    RunSettings {
        config_path: PathBuf::from("unused.json"),
        namespace: "test-ns".to_string(),
        status_server: "127.0.0.1:0".to_string(),
        scenario_name: scenario_name.to_string(),
        webhook_timeout: Duration::from_millis(200),
        options: SequencerOptions {
            poll_interval: Duration::from_millis(1),
            stage_timeout: None,
        },
    }
}
