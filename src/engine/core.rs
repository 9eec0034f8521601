// src/engine/core.rs

//! Pure core state machine for a scenario run.
//!
//! `ScenarioCore` owns the stage list, the active stage and the final
//! outcome. It consumes [`SequencerEvent`]s and returns a [`CoreStep`]
//! describing what the async shell should do: submit a job, send a
//! notification, delete a job, or finish.
//!
//! It holds no clients, channels or timers, so it can be unit tested
//! without a cluster.

use tracing::{info, warn};

use crate::artifact::ArtifactPath;
use crate::config::model::{ScenarioConfig, StageConfig};
use crate::engine::event_handlers::{
    begin_stage, handle_poll_failure, handle_stage_timeout, handle_status_observed, CoreStep,
};
use crate::engine::{ScenarioOutcome, SequencerEvent};
use crate::exec::JobStatus;

/// Immutable description of the scenario being run.
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    pub name: String,
    pub stages: Vec<StageConfig>,
}

/// The stage whose job is currently submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStage {
    pub index: usize,
    pub module: String,
    pub artifact: ArtifactPath,
    pub status: JobStatus,
    /// Set once the first `Running` reading has been logged.
    pub start_reported: bool,
}

#[derive(Debug)]
pub struct ScenarioCore {
    plan: ScenarioPlan,
    active: Option<ActiveStage>,
    outcome: Option<ScenarioOutcome>,
}

impl ScenarioCore {
    pub fn new(scenario_name: impl Into<String>, scenario: ScenarioConfig) -> Self {
        Self {
            plan: ScenarioPlan {
                name: scenario_name.into(),
                stages: scenario.into_stages(),
            },
            active: None,
            outcome: None,
        }
    }

    pub fn scenario_name(&self) -> &str {
        &self.plan.name
    }

    pub fn stage_count(&self) -> usize {
        self.plan.stages.len()
    }

    pub fn active_stage(&self) -> Option<&ActiveStage> {
        self.active.as_ref()
    }

    /// Name of the job the shell should be polling, if any.
    pub fn current_module(&self) -> Option<&str> {
        self.active.as_ref().map(|stage| stage.module.as_str())
    }

    pub fn outcome(&self) -> Option<&ScenarioOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Seed the artifact path from stage 0 and launch it.
    pub fn start(&mut self) -> CoreStep {
        if self.active.is_some() || self.outcome.is_some() {
            warn!(scenario = %self.plan.name, "scenario already started; ignoring start");
            return CoreStep::idle(!self.is_finished());
        }

        let Some(first) = self.plan.stages.first() else {
            warn!(scenario = %self.plan.name, "scenario has no stages");
            let outcome = ScenarioOutcome::Completed {
                final_artifact: ArtifactPath::seed("", 0).final_path(),
            };
            self.outcome = Some(outcome.clone());
            return CoreStep::finish(Vec::new(), outcome);
        };

        let seed = match first.artifact_seed() {
            Some(path) => path.to_string(),
            None => {
                warn!(
                    module = %first.module_name,
                    "first stage has no s3path; derived artifact paths will be empty-prefixed"
                );
                String::new()
            }
        };

        info!(
            scenario = %self.plan.name,
            stages = self.plan.stages.len(),
            seed = %seed,
            "starting scenario"
        );

        let artifact = ArtifactPath::seed(seed, self.plan.stages.len());
        let (active, command) = begin_stage(&self.plan, 0, artifact);
        self.active = Some(active);

        CoreStep {
            commands: vec![command],
            keep_running: true,
        }
    }

    /// Handle a single event, updating state and returning the resulting
    /// commands for the shell.
    pub fn step(&mut self, event: SequencerEvent) -> CoreStep {
        if self.outcome.is_some() {
            return CoreStep::idle(false);
        }

        match event {
            SequencerEvent::StatusObserved(status) => handle_status_observed(
                &self.plan,
                &mut self.active,
                &mut self.outcome,
                status,
            ),
            SequencerEvent::PollFailed { error } => handle_poll_failure(&self.active, &error),
            SequencerEvent::StageTimedOut => {
                handle_stage_timeout(&self.plan, &mut self.active, &mut self.outcome)
            }
        }
    }
}
