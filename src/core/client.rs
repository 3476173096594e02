//! reqwest-backed HTTP transport
//!
//! Performs the actual network exchange for the providers. A transport
//! failure (DNS, refused connection, timeout) is reported as a
//! [`TransportError`]; any HTTP status, including errors, is returned as a
//! response for the provider to interpret.

use crate::core::provider::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP transport built on a shared `reqwest::Client`
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport
    ///
    /// # Arguments
    ///
    /// * `timeout` - Optional request timeout in seconds; `None` leaves the
    ///   platform default in place
    pub fn new(timeout: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

/// Flatten a reqwest error and its causes into one message
///
/// The URL is dropped: the Gemini key travels as a query parameter.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(describe(err))
    } else {
        TransportError::Failed(describe(err))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        let response = req_builder
            .json(&request.body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(transport_error)?;

        debug!("Received {} bytes with status {}", body.len(), status);

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
