//! Gemini provider implementation

use crate::core::provider::{HttpRequest, HttpTransport, ProviderError};
use crate::models::gemini::{GenerateContentRequest, error_message, first_candidate_text};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Text returned by a successful generateContent call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub status: u16,
    pub text: String,
}

/// Client for Google's Generative Language API
pub struct GeminiProvider {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_key: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Arguments
    ///
    /// * `transport` - HTTP transport used for the call
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    /// * `api_key` - API key, sent as the `key` query parameter
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str, api_key: String) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }

    /// Send one generateContent request
    ///
    /// A 2xx response always yields text: if the first candidate carries none,
    /// the "No content" placeholder is returned instead.
    ///
    /// # Errors
    ///
    /// * `Transport` if no response was received
    /// * `ApiError` with `error.message` for a non-2xx status
    /// * `Decode` if the body is not JSON
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedText, ProviderError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ProviderError::Transport(format!("Failed to encode request: {}", e)))?;

        debug!("Sending generateContent request to model {}", model);
        let response = self
            .transport
            .send(HttpRequest::post_json(self.endpoint_url(model), body))
            .await?;

        let payload: Value = response.json()?;

        if response.is_success() {
            Ok(GeneratedText {
                status: response.status,
                text: first_candidate_text(&payload),
            })
        } else {
            let message = error_message(&payload);
            warn!("Gemini returned status {}: {}", response.status, message);
            Err(ProviderError::ApiError {
                status: response.status,
                message,
            })
        }
    }
}
