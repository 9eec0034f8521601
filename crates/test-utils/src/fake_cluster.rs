use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use cascade::errors::ClusterError;
use cascade::exec::{BackendFuture, ClusterBackend, JobCounters, JobStatus};
use k8s_openapi::api::batch::v1::Job;

/// One call made against the fake cluster, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCall {
    Create { namespace: String, name: String },
    Poll { name: String },
    Delete { name: String },
}

/// Scripted reply to a status query.
#[derive(Debug, Clone)]
pub enum PollReply {
    Counters(JobCounters),
    Error(String),
}

impl PollReply {
    /// Counters that classify as `status`.
    pub fn status(status: JobStatus) -> Self {
        let counters = match status {
            JobStatus::NotStarted => JobCounters::new(0, 0, 0),
            JobStatus::Running => JobCounters::new(1, 0, 0),
            JobStatus::Succeeded => JobCounters::new(0, 1, 0),
            JobStatus::Failed => JobCounters::new(0, 0, 1),
        };
        PollReply::Counters(counters)
    }

    pub fn error(msg: &str) -> Self {
        PollReply::Error(msg.to_string())
    }
}

#[derive(Debug, Default)]
struct FakeState {
    scripts: HashMap<String, VecDeque<PollReply>>,
    create_failures: HashSet<String>,
    delete_failures: HashSet<String>,
    live: HashSet<String>,
    created: Vec<Job>,
    calls: Vec<ClusterCall>,
}

/// In-memory `ClusterBackend`:
/// - records every call
/// - replays a per-job script of status replies (the last reply repeats)
/// - rejects a second create for a job that still exists
///
/// Jobs without a script go `NotStarted -> Running -> Succeeded`.
#[derive(Debug, Clone, Default)]
pub struct FakeCluster {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, name: &str, replies: Vec<PollReply>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(name.to_string(), replies.into());
        self
    }

    /// Shorthand: `Running`, then `Succeeded`.
    pub fn succeed(&self, name: &str) -> &Self {
        self.script(
            name,
            vec![
                PollReply::status(JobStatus::Running),
                PollReply::status(JobStatus::Succeeded),
            ],
        )
    }

    /// Shorthand: `Running`, then `Failed`.
    pub fn fail(&self, name: &str) -> &Self {
        self.script(
            name,
            vec![
                PollReply::status(JobStatus::Running),
                PollReply::status(JobStatus::Failed),
            ],
        )
    }

    pub fn fail_create(&self, name: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .create_failures
            .insert(name.to_string());
        self
    }

    pub fn fail_delete(&self, name: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .delete_failures
            .insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ClusterCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn created_jobs(&self) -> Vec<Job> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn created_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ClusterCall::Create { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ClusterCall::Delete { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn poll_count(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ClusterCall::Poll { name: n } if n == name))
            .count()
    }

    /// The job created for `name`, if any.
    pub fn job(&self, name: &str) -> Option<Job> {
        self.created_jobs()
            .into_iter()
            .find(|j| j.metadata.name.as_deref() == Some(name))
    }

    fn next_reply(state: &mut FakeState, name: &str) -> PollReply {
        let script = state.scripts.entry(name.to_string()).or_insert_with(|| {
            VecDeque::from(vec![
                PollReply::status(JobStatus::NotStarted),
                PollReply::status(JobStatus::Running),
                PollReply::status(JobStatus::Succeeded),
            ])
        });

        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or_else(|| PollReply::status(JobStatus::NotStarted))
        }
    }
}

impl ClusterBackend for FakeCluster {
    fn create_job<'a>(&'a self, namespace: &'a str, job: Job) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            let name = job.metadata.name.clone().unwrap_or_default();
            state.calls.push(ClusterCall::Create {
                namespace: namespace.to_string(),
                name: name.clone(),
            });

            if state.create_failures.contains(&name) {
                return Err(ClusterError::Backend(format!(
                    "admission webhook denied job \"{name}\""
                )));
            }
            if !state.live.insert(name.clone()) {
                return Err(ClusterError::Backend(format!(
                    "jobs.batch \"{name}\" already exists"
                )));
            }

            state.created.push(job);
            Ok(())
        })
    }

    fn job_counters<'a>(
        &'a self,
        _namespace: &'a str,
        name: &'a str,
    ) -> BackendFuture<'a, JobCounters> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(ClusterCall::Poll {
                name: name.to_string(),
            });

            if !state.live.contains(name) {
                return Err(ClusterError::Backend(format!(
                    "jobs.batch \"{name}\" not found"
                )));
            }

            match Self::next_reply(&mut state, name) {
                PollReply::Counters(counters) => Ok(counters),
                PollReply::Error(msg) => Err(ClusterError::Backend(msg)),
            }
        })
    }

    fn delete_job<'a>(&'a self, _namespace: &'a str, name: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(ClusterCall::Delete {
                name: name.to_string(),
            });

            if state.delete_failures.contains(name) {
                return Err(ClusterError::Backend(format!(
                    "failed to delete job \"{name}\""
                )));
            }

            state.live.remove(name);
            Ok(())
        })
    }
}
