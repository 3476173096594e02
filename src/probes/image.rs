//! Image-generation probe against the Hugging Face inference API

use crate::core::config::{HUGGING_FACE_TOKEN_VARS, HuggingFaceSettings};
use crate::core::provider::{HttpTransport, ProviderError};
use crate::core::providers::{GeneratedImage, HuggingFaceProvider};
use crate::models::huggingface::TextToImageRequest;
use std::sync::Arc;

/// Send the configured prompt once and measure the returned image
pub async fn run_image_probe(
    transport: Arc<dyn HttpTransport>,
    settings: &HuggingFaceSettings,
    token: Option<&str>,
) -> Result<GeneratedImage, ProviderError> {
    let token = token.ok_or(ProviderError::MissingCredential(HUGGING_FACE_TOKEN_VARS[0]))?;
    let provider = HuggingFaceProvider::new(
        transport,
        &settings.inference_url,
        &settings.router_url,
        token.to_string(),
    );

    provider
        .text_to_image(
            &settings.probe_model,
            &TextToImageRequest::prompt_only(&settings.probe_prompt),
        )
        .await
}
