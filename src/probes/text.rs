//! Text-generation probe against the Gemini API

use crate::core::config::{GEMINI_API_KEY_VAR, GeminiSettings};
use crate::core::provider::{HttpTransport, ProviderError};
use crate::core::providers::{GeminiProvider, GeneratedText};
use crate::models::gemini::{GenerateContentRequest, GenerationConfig};
use std::sync::Arc;

/// Send the configured prompt once and return the first candidate's text
pub async fn run_text_probe(
    transport: Arc<dyn HttpTransport>,
    settings: &GeminiSettings,
    api_key: Option<&str>,
) -> Result<GeneratedText, ProviderError> {
    let api_key = api_key.ok_or(ProviderError::MissingCredential(GEMINI_API_KEY_VAR))?;
    let provider = GeminiProvider::new(transport, &settings.base_url, api_key.to_string());

    let request = GenerateContentRequest::single_prompt(
        &settings.prompt,
        GenerationConfig {
            temperature: settings.temperature,
            top_k: settings.top_k,
            top_p: settings.top_p,
            max_output_tokens: settings.max_output_tokens,
        },
    );

    provider.generate_content(&settings.model, &request).await
}
