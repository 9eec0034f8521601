// src/notify/webhook.rs

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::errors::NotifyError;

use super::{Notifier, NotifyFuture};

/// Upper bound on one webhook request, connection included.
pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    message: &'a str,
}

/// Posts `{"message": "..."}` as JSON to a fixed address.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// `address` may omit the scheme (e.g. `127.0.0.1:8000`), in which case
    /// plain `http://` is used.
    ///
    /// A request that gets no complete response within `timeout` fails with
    /// [`NotifyError::Http`].
    pub fn new(address: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, address))
    }

    pub fn with_client(client: Client, address: &str) -> Self {
        Self {
            client,
            url: normalize_address(address),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Notifier for WebhookNotifier {
    fn send<'a>(&'a self, message: &'a str) -> NotifyFuture<'a> {
        Box::pin(async move {
            debug!(url = %self.url, %message, "sending webhook");

            let resp = self
                .client
                .post(&self.url)
                .json(&WebhookPayload { message })
                .send()
                .await?;

            Ok(resp.status())
        })
    }
}

fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}
