use crate::domain::{format_summary, ApplicationDraft, SubmissionError, SubmissionResult};
use crate::infrastructure::config::{SubmissionConfig, TransportKind};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Delivers a finished application somewhere.
///
/// Implementations block until the attempt has either succeeded or failed;
/// callers that must stay responsive run them on a worker thread.
pub trait SubmissionTransport: Send + Sync {
    fn submit(&self, draft: &ApplicationDraft) -> SubmissionResult;
}

/// Posts the draft as JSON to an HTTP endpoint.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SubmissionTransport for HttpTransport {
    fn submit(&self, draft: &ApplicationDraft) -> SubmissionResult {
        let body = serde_json::to_vec(draft).map_err(|e| SubmissionError::Encode(e.to_string()))?;

        debug!(endpoint = %self.endpoint, bytes = body.len(), "posting application");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmissionError::Rejected(status.as_u16()))
        }
    }
}

/// Writes a text summary to the log and pretends to wait on a server.
#[derive(Debug, Clone, Default)]
pub struct ConsoleTransport {
    latency: Duration,
}

impl ConsoleTransport {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl SubmissionTransport for ConsoleTransport {
    fn submit(&self, draft: &ApplicationDraft) -> SubmissionResult {
        info!(target: "jobapply::submission", "\n{}", format_summary(draft));
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        Ok(())
    }
}

pub fn build_transport(config: &SubmissionConfig) -> Arc<dyn SubmissionTransport> {
    match config.transport {
        TransportKind::Http => Arc::new(HttpTransport::new(config.endpoint.clone())),
        TransportKind::Console => Arc::new(ConsoleTransport::new(config.console_latency)),
    }
}
