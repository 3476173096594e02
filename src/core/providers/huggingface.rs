//! Hugging Face inference provider implementation

use crate::core::constants::diffusion;
use crate::core::provider::{
    HttpRequest, HttpResponse, HttpTransport, ProviderError, TransportError,
};
use crate::models::huggingface::TextToImageRequest;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a successful text-to-image call; only the size is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub status: u16,
    pub size: usize,
}

/// Client for the Hugging Face text-to-image endpoints
pub struct HuggingFaceProvider {
    transport: Arc<dyn HttpTransport>,
    inference_url: String,
    router_url: String,
    token: String,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face provider
    ///
    /// # Arguments
    ///
    /// * `transport` - HTTP transport used for the calls
    /// * `inference_url` - Direct inference API root
    /// * `router_url` - Router API root, tried first by [`Self::generate_image`]
    /// * `token` - Access token, sent as a bearer credential
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        inference_url: &str,
        router_url: &str,
        token: String,
    ) -> Self {
        Self {
            transport,
            inference_url: inference_url.trim_end_matches('/').to_string(),
            router_url: router_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(
        &self,
        root: &str,
        model_id: &str,
        payload: &TextToImageRequest,
    ) -> Result<HttpRequest, ProviderError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| ProviderError::Transport(format!("Failed to encode request: {}", e)))?;

        Ok(HttpRequest::post_json(format!("{}/{}", root, model_id), body).bearer_auth(&self.token))
    }

    /// Send a generation request, describing transport failures for the
    /// backend's clients
    async fn post_generation(
        &self,
        root: &str,
        model_id: &str,
        payload: &TextToImageRequest,
    ) -> Result<HttpResponse, ProviderError> {
        let request = self.request(root, model_id, payload)?;

        self.transport.send(request).await.map_err(|e| match e {
            TransportError::Timeout(message) => {
                warn!("Image generation timed out: {}", message);
                ProviderError::Transport(diffusion::TIMEOUT_MESSAGE.to_string())
            }
            TransportError::Failed(message) => {
                ProviderError::Transport(format!("Request failed: {}", message))
            }
        })
    }

    /// Single call to the direct inference endpoint
    ///
    /// # Errors
    ///
    /// * `Transport` if no response was received
    /// * `ApiError` carrying the response body verbatim for a non-2xx status
    pub async fn text_to_image(
        &self,
        model_id: &str,
        payload: &TextToImageRequest,
    ) -> Result<GeneratedImage, ProviderError> {
        let request = self.request(&self.inference_url, model_id, payload)?;
        let response = self.transport.send(request).await?;

        if response.is_success() {
            Ok(GeneratedImage {
                status: response.status,
                size: response.body.len(),
            })
        } else {
            Err(ProviderError::ApiError {
                status: response.status,
                message: response.text(),
            })
        }
    }

    /// Generate an image through the router, falling back to the direct
    /// inference endpoint when the router reports the route as gone
    ///
    /// Returns the raw image bytes. Only a 200 counts as success.
    pub async fn generate_image(
        &self,
        model_id: &str,
        payload: &TextToImageRequest,
    ) -> Result<Vec<u8>, ProviderError> {
        let mut response = self.post_generation(&self.router_url, model_id, payload).await?;
        info!("Router response status: {}", response.status);

        if response.status == diffusion::ROUTER_GONE {
            info!("Router endpoint deprecated, trying direct API...");
            response = self
                .post_generation(&self.inference_url, model_id, payload)
                .await?;
        }

        if response.status == 200 {
            debug!("Received {} image bytes from {}", response.body.len(), model_id);
            Ok(response.body)
        } else {
            warn!("API Error: {} - {}", response.status, response.text());
            Err(ProviderError::ApiError {
                status: response.status,
                message: format!("API Error: {}", response.status),
            })
        }
    }
}
