// src/engine/runtime.rs

use std::fmt;

use anyhow::anyhow;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::exec::{launch_stage, poll_status, ClusterBackend};
use crate::notify::{Notifier, StatusCode};

use super::core::ScenarioCore;
use super::{CoreCommand, CoreStep, ScenarioOutcome, SequencerEvent, SequencerOptions};

/// Drives a [`ScenarioCore`] against a cluster and a status endpoint.
///
/// This is the IO shell around the core: it submits jobs, polls the active
/// job until the core reports a terminal transition, sends notifications and
/// deletes finished jobs. Only one stage job exists at a time.
pub struct Sequencer<B: ClusterBackend, N: Notifier> {
    core: ScenarioCore,
    cluster: B,
    notifier: N,
    namespace: String,
    options: SequencerOptions,
}

impl<B: ClusterBackend, N: Notifier> fmt::Debug for Sequencer<B, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("core", &self.core)
            .field("namespace", &self.namespace)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<B: ClusterBackend, N: Notifier> Sequencer<B, N> {
    pub fn new(
        core: ScenarioCore,
        cluster: B,
        notifier: N,
        namespace: impl Into<String>,
        options: SequencerOptions,
    ) -> Self {
        Self {
            core,
            cluster,
            notifier,
            namespace: namespace.into(),
            options,
        }
    }

    /// Run every stage in order.
    ///
    /// Returns the scenario outcome once a stage fails or all of them
    /// succeed. A job that cannot be submitted is returned as an error.
    pub async fn run(mut self) -> Result<ScenarioOutcome> {
        info!(
            scenario = %self.core.scenario_name(),
            namespace = %self.namespace,
            stages = self.core.stage_count(),
            "sequencer started"
        );

        let mut stage_started = Instant::now();

        let step = self.core.start();
        if let Some(outcome) = self.execute_step(step, &mut stage_started).await? {
            return Ok(outcome);
        }

        loop {
            let event = self.next_event(stage_started).await?;
            let step = self.core.step(event);

            if let Some(outcome) = self.execute_step(step, &mut stage_started).await? {
                return Ok(outcome);
            }

            sleep(self.options.poll_interval).await;
        }
    }

    /// Query the active job, or report a timeout if it has been running for
    /// too long.
    async fn next_event(&self, stage_started: Instant) -> Result<SequencerEvent> {
        let module = self
            .core
            .current_module()
            .ok_or_else(|| anyhow!("no active stage to poll"))?;

        if let Some(limit) = self.options.stage_timeout {
            if stage_started.elapsed() >= limit {
                return Ok(SequencerEvent::StageTimedOut);
            }
        }

        let event = match poll_status(&self.cluster, &self.namespace, module).await {
            Ok(status) => SequencerEvent::StatusObserved(status),
            Err(err) => SequencerEvent::PollFailed {
                error: err.to_string(),
            },
        };
        Ok(event)
    }

    /// Execute the core's commands in order. Returns the outcome if the step
    /// finished the scenario.
    async fn execute_step(
        &mut self,
        step: CoreStep,
        stage_started: &mut Instant,
    ) -> Result<Option<ScenarioOutcome>> {
        let mut finished = None;

        for command in step.commands {
            match command {
                CoreCommand::Launch(request) => {
                    launch_stage(&self.cluster, &self.namespace, &request.stage, &request.artifact)
                        .await?;
                    *stage_started = Instant::now();
                }
                CoreCommand::Notify(message) => self.report(&message).await,
                CoreCommand::DeleteJob(module) => self.delete_finished(&module).await,
                CoreCommand::Finish(outcome) => finished = Some(outcome),
            }
        }

        if finished.is_none() && !step.keep_running {
            // The core stops only together with a Finish command.
            return Err(anyhow!("sequencer stopped without an outcome").into());
        }

        Ok(finished)
    }

    async fn report(&self, message: &str) {
        match self.notifier.send(message).await {
            Ok(code) if code == StatusCode::OK => {
                debug!(%message, "webhook delivered");
            }
            Ok(code) => {
                error!(status = code.as_u16(), %message, "webhook returned fail code");
            }
            Err(err) => {
                error!(error = %err, %message, "webhook failed");
            }
        }
    }

    async fn delete_finished(&self, module: &str) {
        match self.cluster.delete_job(&self.namespace, module).await {
            Ok(()) => debug!(%module, "deleted finished job"),
            Err(err) => error!(%module, error = %err, "failed to delete successful job"),
        }
    }
}
