// src/notify/mod.rs

//! Status reporting to an external HTTP endpoint.
//!
//! The sequencer reports through the [`Notifier`] trait; production uses
//! [`WebhookNotifier`]. Delivery is best-effort: callers log failures and
//! carry on.

pub mod webhook;

use std::future::Future;
use std::pin::Pin;

pub use reqwest::StatusCode;
pub use webhook::{WebhookNotifier, DEFAULT_WEBHOOK_TIMEOUT};

use crate::errors::NotifyError;

/// Boxed future returned by [`Notifier::send`].
pub type NotifyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<StatusCode, NotifyError>> + Send + 'a>>;

pub trait Notifier: Send + Sync {
    /// Deliver `message` and return the endpoint's response status.
    fn send<'a>(&'a self, message: &'a str) -> NotifyFuture<'a>;
}
