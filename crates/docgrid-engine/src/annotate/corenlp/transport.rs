use std::time::Duration;

use crate::annotate::AnnotateError;

/// Delivers one annotation request and returns the raw response body.
pub trait Transport: Send + Sync {
    fn post(&self, properties: &str, text: &str) -> Result<String, AnnotateError>;
}

/// Blocking HTTP transport for a CoreNLP server.
///
/// Requests are bounded by `timeout`; retries are left to the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AnnotateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnnotateError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn post(&self, properties: &str, text: &str) -> Result<String, AnnotateError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("properties", properties)])
            .body(text.to_owned())
            .send()
            .map_err(map_reqwest)?;
        response.text().map_err(map_reqwest)
    }
}

fn map_reqwest(e: reqwest::Error) -> AnnotateError {
    if e.is_timeout() {
        AnnotateError::TimedOut
    } else {
        AnnotateError::Transport(e.to_string())
    }
}
