//! Hugging Face text-to-image inference models

use serde::Serialize;

/// Body of a text-to-image inference call
///
/// The probe sends the bare prompt; the backend adds diffusion parameters.
#[derive(Debug, Clone, Serialize)]
pub struct TextToImageRequest {
    pub inputs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<DiffusionParameters>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffusionParameters {
    pub negative_prompt: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub height: u32,
    pub width: u32,
}

impl TextToImageRequest {
    pub fn prompt_only(prompt: &str) -> Self {
        Self {
            inputs: prompt.to_string(),
            parameters: None,
        }
    }
}
