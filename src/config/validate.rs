// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{RawScenarioConfig, ScenarioConfig, StageConfig};
use crate::errors::{CascadeError, Result};

impl TryFrom<RawScenarioConfig> for ScenarioConfig {
    type Error = CascadeError;

    fn try_from(raw: RawScenarioConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ScenarioConfig::new_unchecked(raw.stages))
    }
}

fn validate_raw_config(cfg: &RawScenarioConfig) -> Result<()> {
    ensure_has_stages(cfg)?;
    validate_module_names(cfg)?;
    for stage in &cfg.stages {
        validate_template(stage)?;
    }
    Ok(())
}

fn ensure_has_stages(cfg: &RawScenarioConfig) -> Result<()> {
    if cfg.stages.is_empty() {
        return Err(CascadeError::ConfigError(
            "scenario must contain at least one stage".to_string(),
        ));
    }
    Ok(())
}

fn validate_module_names(cfg: &RawScenarioConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, stage) in cfg.stages.iter().enumerate() {
        if stage.module_name.trim().is_empty() {
            return Err(CascadeError::ConfigError(format!(
                "stage {} has an empty moduleName",
                idx
            )));
        }
        // Module names become job names; a repeat would collide on submit.
        if !seen.insert(stage.module_name.as_str()) {
            return Err(CascadeError::ConfigError(format!(
                "duplicate moduleName '{}' (stage {})",
                stage.module_name, idx
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_template(stage: &StageConfig) -> Result<()> {
    let has_container = stage
        .template
        .spec
        .as_ref()
        .is_some_and(|spec| !spec.containers.is_empty());

    if !has_container {
        return Err(CascadeError::InvalidTemplate {
            module: stage.module_name.clone(),
            reason: "template.spec.containers is empty".to_string(),
        });
    }
    Ok(())
}
