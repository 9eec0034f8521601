// src/config/mod.rs

//! Scenario configuration loading and validation.
//!
//! Responsibilities:
//! - Define the JSON-backed stage model (`model.rs`).
//! - Load a scenario file from disk (`loader.rs`).
//! - Validate basic invariants like unique module names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{RawScenarioConfig, ScenarioConfig, StageConfig};
