// src/engine/event_handlers.rs

//! Event handling logic for the core state machine.

use tracing::{error, info, warn};

use crate::artifact::ArtifactPath;
use crate::config::model::StageConfig;
use crate::engine::core::{ActiveStage, ScenarioPlan};
use crate::engine::{AbortReason, ModuleName, ScenarioOutcome};
use crate::exec::JobStatus;

/// Everything the shell needs to submit one stage.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub stage: StageConfig,
    pub artifact: ArtifactPath,
}

/// Command produced by the pure core, to be executed by the async shell in
/// order.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Submit the stage's job.
    Launch(LaunchRequest),
    /// Send a status message to the webhook.
    Notify(String),
    /// Delete a finished job.
    DeleteJob(ModuleName),
    /// The scenario is over.
    Finish(ScenarioOutcome),
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    /// Whether the polling loop should keep going.
    pub keep_running: bool,
}

impl CoreStep {
    pub(crate) fn idle(keep_running: bool) -> Self {
        Self {
            commands: Vec::new(),
            keep_running,
        }
    }

    pub(crate) fn finish(mut commands: Vec<CoreCommand>, outcome: ScenarioOutcome) -> Self {
        commands.push(CoreCommand::Finish(outcome));
        Self {
            commands,
            keep_running: false,
        }
    }
}

pub fn module_succeeded_message(module: &str, scenario: &str) -> String {
    format!("Module {module} in scenario {scenario} finished successfully")
}

pub fn module_failed_message(module: &str, scenario: &str) -> String {
    format!("Module {module} in scenario {scenario} failed")
}

pub fn module_timed_out_message(module: &str, scenario: &str) -> String {
    format!("Module {module} in scenario {scenario} failed: timed out waiting for job to finish")
}

pub fn scenario_completed_message(scenario: &str, final_artifact: &str) -> String {
    format!("Scenario {scenario} completed successfully. Package address - {final_artifact}")
}

/// Make stage `index` the active stage and produce its launch command.
pub fn begin_stage(
    plan: &ScenarioPlan,
    index: usize,
    artifact: ArtifactPath,
) -> (ActiveStage, CoreCommand) {
    let stage = plan.stages[index].clone();

    let active = ActiveStage {
        index,
        module: stage.module_name.clone(),
        artifact: artifact.clone(),
        status: JobStatus::NotStarted,
        start_reported: false,
    };

    (active, CoreCommand::Launch(LaunchRequest { stage, artifact }))
}

/// Handle a classified status reading for the active stage.
///
/// - `NotStarted`: nothing to do.
/// - first `Running`: log the stage start once.
/// - `Succeeded`: report, delete the job, then launch the next stage or
///   complete the scenario.
/// - `Failed`: report and abort; the failed job is left in place.
pub fn handle_status_observed(
    plan: &ScenarioPlan,
    active: &mut Option<ActiveStage>,
    outcome: &mut Option<ScenarioOutcome>,
    observed: JobStatus,
) -> CoreStep {
    let Some(stage) = active.as_mut() else {
        warn!(%observed, "status reading with no active stage; ignoring");
        return CoreStep::idle(outcome.is_none());
    };

    stage.status = stage.status.advance(observed);

    match stage.status {
        JobStatus::NotStarted => CoreStep::idle(true),
        JobStatus::Running => {
            if !stage.start_reported {
                info!(module = %stage.module, stage = stage.index, "job started");
                stage.start_reported = true;
            }
            CoreStep::idle(true)
        }
        JobStatus::Succeeded => {
            let Some(done) = active.take() else {
                return CoreStep::idle(true);
            };
            complete_stage(plan, active, outcome, done)
        }
        JobStatus::Failed => {
            let Some(failed) = active.take() else {
                return CoreStep::idle(true);
            };
            error!(
                module = %failed.module,
                stage = failed.index,
                "scenario execution failed"
            );
            abort(
                outcome,
                module_failed_message(&failed.module, &plan.name),
                failed.module,
                AbortReason::StageFailed,
            )
        }
    }
}

/// A status query failed: log and keep polling.
pub fn handle_poll_failure(active: &Option<ActiveStage>, error: &str) -> CoreStep {
    match active {
        Some(stage) => warn!(module = %stage.module, %error, "get job status failed"),
        None => warn!(%error, "get job status failed with no active stage"),
    }
    CoreStep::idle(true)
}

/// The active stage ran out of time: report and abort like a failure.
pub fn handle_stage_timeout(
    plan: &ScenarioPlan,
    active: &mut Option<ActiveStage>,
    outcome: &mut Option<ScenarioOutcome>,
) -> CoreStep {
    let Some(stage) = active.take() else {
        return CoreStep::idle(outcome.is_none());
    };

    error!(
        module = %stage.module,
        stage = stage.index,
        status = %stage.status,
        "stage timed out; aborting scenario"
    );

    abort(
        outcome,
        module_timed_out_message(&stage.module, &plan.name),
        stage.module,
        AbortReason::PollTimeout,
    )
}

fn complete_stage(
    plan: &ScenarioPlan,
    active: &mut Option<ActiveStage>,
    outcome: &mut Option<ScenarioOutcome>,
    done: ActiveStage,
) -> CoreStep {
    info!(module = %done.module, stage = done.index, "stage finished successfully");

    let mut commands = vec![
        CoreCommand::Notify(module_succeeded_message(&done.module, &plan.name)),
        CoreCommand::DeleteJob(done.module.clone()),
    ];

    let next_index = done.index + 1;
    if next_index < plan.stages.len() {
        let artifact = done.artifact.advance(plan.stages.len());
        let (next, launch) = begin_stage(plan, next_index, artifact);
        *active = Some(next);
        commands.push(launch);
        return CoreStep {
            commands,
            keep_running: true,
        };
    }

    let final_artifact = done.artifact.final_path();
    info!(
        scenario = %plan.name,
        %final_artifact,
        "scenario execution finished successfully"
    );
    commands.push(CoreCommand::Notify(scenario_completed_message(
        &plan.name,
        &final_artifact,
    )));

    let result = ScenarioOutcome::Completed { final_artifact };
    *outcome = Some(result.clone());
    CoreStep::finish(commands, result)
}

fn abort(
    outcome: &mut Option<ScenarioOutcome>,
    message: String,
    module: ModuleName,
    reason: AbortReason,
) -> CoreStep {
    let result = ScenarioOutcome::Aborted { module, reason };
    *outcome = Some(result.clone());
    CoreStep::finish(vec![CoreCommand::Notify(message)], result)
}
