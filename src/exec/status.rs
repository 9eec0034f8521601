// src/exec/status.rs

//! Job status model.

use std::fmt;

use k8s_openapi::api::batch::v1::Job;

/// Pod counters reported by the scheduler for a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounters {
    pub active: i32,
    pub succeeded: i32,
    pub failed: i32,
}

impl JobCounters {
    pub fn new(active: i32, succeeded: i32, failed: i32) -> Self {
        Self {
            active,
            succeeded,
            failed,
        }
    }

    /// Counters from a Job object; missing fields count as zero.
    pub fn from_job(job: &Job) -> Self {
        match job.status.as_ref() {
            Some(status) => Self {
                active: status.active.unwrap_or(0),
                succeeded: status.succeeded.unwrap_or(0),
                failed: status.failed.unwrap_or(0),
            },
            None => Self::default(),
        }
    }
}

/// Live state of a stage's job.
///
/// Progression is `NotStarted -> Running -> {Succeeded | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Classify scheduler counters. First match wins:
    /// all zero, then succeeded, then failed, otherwise running.
    pub fn classify(counters: JobCounters) -> Self {
        let JobCounters {
            active,
            succeeded,
            failed,
        } = counters;

        if active == 0 && succeeded == 0 && failed == 0 {
            JobStatus::NotStarted
        } else if succeeded > 0 {
            JobStatus::Succeeded
        } else if failed > 0 {
            JobStatus::Failed
        } else {
            JobStatus::Running
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    /// Status after observing `observed` while in `self`.
    ///
    /// Terminal states are sticky and a reading never moves the status
    /// backwards.
    pub fn advance(self, observed: JobStatus) -> JobStatus {
        match (self, observed) {
            (current, _) if current.is_terminal() => current,
            (JobStatus::Running, JobStatus::NotStarted) => JobStatus::Running,
            (_, observed) => observed,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::NotStarted => "not-started",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}
