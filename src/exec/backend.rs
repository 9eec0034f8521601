// src/exec/backend.rs

//! Pluggable cluster backend abstraction.
//!
//! The sequencer talks to a `ClusterBackend` instead of a raw Kubernetes
//! client. Production uses [`KubeBackend`]; tests provide an implementation
//! that records calls and replays scripted job statuses.

use std::future::Future;
use std::pin::Pin;

use k8s_openapi::api::batch::v1::Job;
use kube::api::{Api, DeleteParams, PostParams};
use kube::{Client, Config};
use tracing::{debug, info};

use crate::errors::{CascadeError, ClusterError};
use crate::exec::status::JobCounters;

/// Boxed future returned by [`ClusterBackend`] methods.
pub type BackendFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ClusterError>> + Send + 'a>>;

/// Operations the sequencer needs from the job scheduler.
///
/// Calls are independent of each other, so implementations take `&self`.
pub trait ClusterBackend: Send + Sync {
    /// Create `job` in `namespace`.
    fn create_job<'a>(&'a self, namespace: &'a str, job: Job) -> BackendFuture<'a, ()>;

    /// Fetch the status counters of the job called `name`.
    fn job_counters<'a>(&'a self, namespace: &'a str, name: &'a str)
        -> BackendFuture<'a, JobCounters>;

    /// Delete the job called `name`, letting its pods go in the background.
    fn delete_job<'a>(&'a self, namespace: &'a str, name: &'a str) -> BackendFuture<'a, ()>;
}

/// Production backend backed by a `kube` client.
#[derive(Clone)]
pub struct KubeBackend {
    client: Client,
}

impl KubeBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using in-cluster credentials, falling back to the local
    /// kubeconfig (`KUBECONFIG` or `~/.kube/config`).
    pub async fn connect() -> crate::errors::Result<Self> {
        let config = match Config::incluster() {
            Ok(config) => config,
            Err(err) => {
                debug!(error = %err, "in-cluster config unavailable; trying kubeconfig");
                Config::infer()
                    .await
                    .map_err(|e| CascadeError::Connect(format!("kubeconfig cannot be loaded: {e}")))?
            }
        };

        info!(cluster_url = %config.cluster_url, "connecting to cluster");

        let client = Client::try_from(config)
            .map_err(|e| CascadeError::Connect(format!("failed to create client: {e}")))?;

        Ok(Self::new(client))
    }

    fn jobs(&self, namespace: &str) -> Api<Job> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

impl ClusterBackend for KubeBackend {
    fn create_job<'a>(&'a self, namespace: &'a str, job: Job) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            self.jobs(namespace)
                .create(&PostParams::default(), &job)
                .await?;
            Ok(())
        })
    }

    fn job_counters<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> BackendFuture<'a, JobCounters> {
        Box::pin(async move {
            let job = self.jobs(namespace).get(name).await?;
            Ok(JobCounters::from_job(&job))
        })
    }

    fn delete_job<'a>(&'a self, namespace: &'a str, name: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            self.jobs(namespace)
                .delete(name, &DeleteParams::background())
                .await?;
            Ok(())
        })
    }
}
