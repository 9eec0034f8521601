// src/exec/mod.rs

//! Job execution layer.
//!
//! Everything that talks to the cluster scheduler lives here:
//!
//! - [`backend`] provides the `ClusterBackend` trait and the production
//!   `KubeBackend`; tests replace it with a scripted fake.
//! - [`job_spec`] turns a stage plus its artifact state into a Job manifest.
//! - [`launcher`] submits that manifest.
//! - [`status`] defines `JobStatus` and the counter classification.
//! - [`poller`] performs a single status query.

pub mod backend;
pub mod job_spec;
pub mod launcher;
pub mod poller;
pub mod status;

pub use backend::{BackendFuture, ClusterBackend, KubeBackend};
pub use job_spec::{build_job, stage_env};
pub use launcher::launch_stage;
pub use poller::poll_status;
pub use status::{JobCounters, JobStatus};
