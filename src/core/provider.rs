//! Transport abstraction and error types shared by the API providers
//!
//! Providers never talk to `reqwest` directly. They hand an [`HttpRequest`]
//! to an [`HttpTransport`], which lets the probes and the image backend run
//! against a stub in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error types for provider operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Connection, DNS or timeout failure; no HTTP status was received
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {message}")]
    Decode { status: u16, message: String },

    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("Model {0} not found")]
    UnknownModel(String),
}

impl ProviderError {
    /// HTTP status attached to the failure, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::ApiError { status, .. } | ProviderError::Decode { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Failure raised by a transport before any response was received
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured client timeout elapsed
    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Failed(String),
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

/// A JSON POST request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl HttpRequest {
    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        }
    }

    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

#[cfg(test)]
impl HttpRequest {
    /// Look up a header value by case-insensitive name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        serde_json::from_slice(&self.body).map_err(|e| ProviderError::Decode {
            status: self.status,
            message: e.to_string(),
        })
    }
}

/// Something that can perform a single HTTP exchange
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Supported provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Gemini,
    HuggingFace,
}

impl ProviderType {
    /// Parse a probe target as given on the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "gemini" => Some(ProviderType::Gemini),
            "image" | "huggingface" | "hf" => Some(ProviderType::HuggingFace),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "Google Gemini",
            ProviderType::HuggingFace => "Hugging Face",
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for unit tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned replies in order and records every request it sees
    pub struct StubTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        pub requests: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        pub fn new(replies: Vec<Result<HttpResponse, String>>) -> Self {
            Self::scripted(
                replies
                    .into_iter()
                    .map(|reply| reply.map_err(TransportError::Failed))
                    .collect(),
            )
        }

        fn scripted(replies: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(status: u16, body: impl Into<Vec<u8>>) -> Self {
            Self::new(vec![Ok(HttpResponse::new(status, body))])
        }

        pub fn failing(message: &str) -> Self {
            Self::new(vec![Err(message.to_string())])
        }

        pub fn timing_out(message: &str) -> Self {
            Self::scripted(vec![Err(TransportError::Timeout(message.to_string()))])
        }

        pub fn sent(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Failed("no scripted reply".to_string())))
        }
    }
}
