use std::time::Duration;

use serde_json::json;
use tracing::warn;

use super::{Notifier, Severity};

const USER_AGENT: &str = concat!("fencewatch/", env!("CARGO_PKG_VERSION"));

/// Posts alert events as JSON to an HTTP endpoint.
///
/// Only events at or above the configured minimum severity are sent.
/// Delivery failures are logged and swallowed so a broken alert channel
/// cannot stop the polling loop.
pub struct WebhookNotifier {
    client: reqwest::blocking::Client,
    url: String,
    min_severity: Severity,
}

impl WebhookNotifier {
    /// # Arguments
    /// * `url` - endpoint receiving `{"severity": ..., "message": ...}`
    /// * `min_severity` - lowest severity worth delivering
    /// * `timeout` - per-request timeout
    pub fn new(
        url: impl Into<String>,
        min_severity: Severity,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            min_severity,
        })
    }

    fn should_deliver(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if !self.should_deliver(severity) {
            return;
        }

        let payload = json!({
            "severity": severity.as_str(),
            "message": message,
        });

        let result = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .and_then(|response| response.error_for_status());

        if let Err(e) = result {
            warn!(error = %e, "alert webhook delivery failed");
        }
    }
}
