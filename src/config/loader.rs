// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawScenarioConfig, ScenarioConfig};
use crate::errors::Result;

/// Where the scenario file is mounted when running inside the cluster.
pub const DEFAULT_CONFIG_PATH: &str = "/tmp/configuration";

/// Load a scenario file and return the raw stage list.
///
/// This only performs JSON deserialization; use [`load_and_validate`] for
/// the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawScenarioConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawScenarioConfig = serde_json::from_str(&contents)?;

    Ok(config)
}

/// Load a scenario file and validate it.
///
/// Checks for:
/// - at least one stage,
/// - non-empty, unique module names,
/// - at least one container in every template.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ScenarioConfig> {
    let raw_config = load_from_path(&path)?;
    let config = ScenarioConfig::try_from(raw_config)?;
    Ok(config)
}
