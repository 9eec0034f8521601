// src/engine/mod.rs

//! Stage sequencing engine.
//!
//! The pure core state machine lives in [`core`] (with the per-event logic
//! in [`event_handlers`]); it consumes [`SequencerEvent`]s and returns
//! commands. The async shell in [`runtime`] polls the cluster, feeds the
//! core and executes its commands.

use std::time::Duration;

use crate::exec::JobStatus;

/// Canonical module (stage / job) name type used throughout the engine.
pub type ModuleName = String;

/// Options for the async sequencer shell.
#[derive(Debug, Clone, Copy)]
pub struct SequencerOptions {
    /// Delay between two status queries of the same job.
    pub poll_interval: Duration,
    /// Give up on a stage that has not reached a terminal state after this
    /// long. `None` waits for as long as the scheduler keeps the job.
    pub stage_timeout: Option<Duration>,
}

impl Default for SequencerOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            stage_timeout: None,
        }
    }
}

/// Events flowing into the core from the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A status query for the active stage returned.
    StatusObserved(JobStatus),
    /// A status query for the active stage failed.
    PollFailed { error: String },
    /// The active stage exceeded the sequencer's stage timeout.
    StageTimedOut,
}

/// Why a scenario stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    StageFailed,
    PollTimeout,
}

/// Final result of a scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Completed { final_artifact: String },
    Aborted { module: ModuleName, reason: AbortReason },
}

impl ScenarioOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ScenarioOutcome::Completed { .. })
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use core::{ActiveStage, ScenarioCore};
pub use event_handlers::{CoreCommand, CoreStep, LaunchRequest};
pub use runtime::Sequencer;
