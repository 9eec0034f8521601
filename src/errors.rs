// src/errors.rs

//! Crate-wide error types.
//!
//! - [`CascadeError`] is what the sequencer and the entry point return.
//! - [`ClusterError`] covers calls against the job scheduler.
//! - [`NotifyError`] covers status webhook delivery.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CascadeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Cluster connection error: {0}")]
    Connect(String),

    #[error("Invalid job template for module '{module}': {reason}")]
    InvalidTemplate { module: String, reason: String },

    #[error("Failed to create job for module '{module}': {source}")]
    Submit {
        module: String,
        #[source]
        source: ClusterError,
    },

    #[error("Status webhook error: {0}")]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors returned by a [`crate::exec::ClusterBackend`].
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// Backend-specific failure that did not come from the Kubernetes client.
    #[error("{0}")]
    Backend(String),
}

/// Errors returned by a [`crate::notify::Notifier`].
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Delivery failure from a notifier that does not go through `reqwest`.
    #[error("{0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, CascadeError>;
