// src/artifact.rs

//! Artifact path derivation between stages.
//!
//! The scenario's input artifact is read once from stage 0's
//! `configuration["s3path"]`. Every later stage receives a path derived from
//! that seed, and the scenario's result lands at `{prefix}-final.tgz`.
//!
//! [`ArtifactPath`] is a plain value: the sequencer holds one per stage and
//! produces the next one with [`ArtifactPath::advance`].

/// Marker that terminates the artifact prefix.
pub const ARTIFACT_SUFFIX: &str = ".tgz";

/// Configuration key / env var carrying the artifact path.
pub const ARTIFACT_ENV: &str = "s3path";

/// Env var set to `"true"` on the last stage only.
pub const FINAL_STAGE_ENV: &str = "finalstage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath {
    stage_num: usize,
    path: String,
    is_last_stage: bool,
}

impl ArtifactPath {
    /// Artifact state for stage 0 of a scenario with `stage_count` stages.
    pub fn seed(path: impl Into<String>, stage_count: usize) -> Self {
        Self {
            stage_num: 0,
            path: path.into(),
            is_last_stage: stage_count <= 1,
        }
    }

    /// Artifact state for the stage following this one.
    ///
    /// The seed path is carried over untouched.
    pub fn advance(&self, stage_count: usize) -> Self {
        let stage_num = self.stage_num + 1;
        Self {
            stage_num,
            path: self.path.clone(),
            is_last_stage: stage_num + 1 >= stage_count,
        }
    }

    pub fn stage_num(&self) -> usize {
        self.stage_num
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_last_stage(&self) -> bool {
        self.is_last_stage
    }

    /// Seed path up to the first `.tgz` marker.
    pub fn prefix(&self) -> &str {
        match self.path.find(ARTIFACT_SUFFIX) {
            Some(idx) => &self.path[..idx],
            None => &self.path,
        }
    }

    /// Artifact path handed to this stage, or `None` for stage 0 (which runs
    /// with its own configuration only).
    pub fn stage_value(&self) -> Option<String> {
        if self.stage_num == 0 {
            return None;
        }
        Some(format!(
            "{}-stage-{}{}",
            self.prefix(),
            self.stage_num,
            ARTIFACT_SUFFIX
        ))
    }

    /// Location of the scenario's output once every stage succeeded.
    pub fn final_path(&self) -> String {
        format!("{}-final{}", self.prefix(), ARTIFACT_SUFFIX)
    }

    /// Environment variables injected into this stage's job on top of its
    /// configuration.
    pub fn injected_env(&self) -> Vec<(&'static str, String)> {
        let mut env = Vec::new();
        if let Some(value) = self.stage_value() {
            env.push((ARTIFACT_ENV, value));
        }
        if self.is_last_stage {
            env.push((FINAL_STAGE_ENV, "true".to_string()));
        }
        env
    }
}
