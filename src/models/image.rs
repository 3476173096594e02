//! Image backend request and response models

use crate::core::constants::service;
use serde::{Deserialize, Serialize};

/// POST /api/generate-image body
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default = "default_quality")]
    pub quality: Option<String>,
    #[serde(default = "default_size")]
    pub size: Option<String>,
}

fn default_model() -> String {
    service::DEFAULT_MODEL.to_string()
}

fn default_quality() -> Option<String> {
    Some(service::DEFAULT_QUALITY.to_string())
}

fn default_size() -> Option<String> {
    Some(service::DEFAULT_SIZE.to_string())
}

/// Successful generation result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub success: bool,
    pub image_url: String,
    pub model: String,
    pub prompt: String,
}

/// Public description of a registered model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub models: Vec<ModelInfo>,
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: ImageRequest = serde_json::from_str(r#"{"prompt": "a fox"}"#).unwrap();
        assert_eq!(request.model, "stable-diffusion-xl");
        assert_eq!(request.quality.as_deref(), Some("high"));
        assert_eq!(request.size.as_deref(), Some("768x768"));
        assert_eq!(request.style, None);
    }

    #[test]
    fn test_explicit_null_quality() {
        let request: ImageRequest =
            serde_json::from_str(r#"{"prompt": "a fox", "quality": null}"#).unwrap();
        assert_eq!(request.quality, None);
    }
}
