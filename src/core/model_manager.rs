//! Registry of the diffusion models the image backend accepts
//!
//! Maps public model ids to Hugging Face model ids and turns a user prompt
//! plus style and quality hints into an inference request.

use crate::core::constants::diffusion;
use crate::core::provider::ProviderError;
use crate::models::huggingface::{DiffusionParameters, TextToImageRequest};
use crate::models::image::ModelInfo;

/// A registered diffusion model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageModel {
    pub id: &'static str,
    pub model_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const MODELS: [ImageModel; 3] = [
    ImageModel {
        id: "stable-diffusion-xl",
        model_id: "stabilityai/stable-diffusion-xl-base-1.0",
        name: "Stable Diffusion XL",
        description: "High-quality image generation",
    },
    ImageModel {
        id: "stable-diffusion-3",
        model_id: "stabilityai/stable-diffusion-3.5-large",
        name: "Stable Diffusion 3.5",
        description: "Latest Stable Diffusion model",
    },
    ImageModel {
        id: "dreamshaper",
        model_id: "Lykon/dreamshaper-8",
        name: "DreamShaper",
        description: "Artistic image generation",
    },
];

/// Resolves model ids and prepares generation requests
#[derive(Debug, Default)]
pub struct ModelManager;

impl ModelManager {
    pub fn new() -> Self {
        Self
    }

    /// All registered models, in listing order
    pub fn model_infos(&self) -> Vec<ModelInfo> {
        MODELS
            .iter()
            .map(|m| ModelInfo {
                id: m.id.to_string(),
                name: m.name.to_string(),
                description: m.description.to_string(),
            })
            .collect()
    }

    /// Look up a model by its public id
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::UnknownModel` if the id is not registered
    pub fn resolve(&self, id: &str) -> Result<&'static ImageModel, ProviderError> {
        MODELS
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ProviderError::UnknownModel(id.to_string()))
    }

    /// Build the full inference request for a prompt
    pub fn build_request(
        &self,
        prompt: &str,
        style: Option<&str>,
        quality: Option<&str>,
        size: Option<&str>,
    ) -> TextToImageRequest {
        let (width, height) = size.and_then(parse_size).unwrap_or((
            diffusion::DEFAULT_EDGE,
            diffusion::DEFAULT_EDGE,
        ));

        TextToImageRequest {
            inputs: enhance_prompt(prompt, style, quality),
            parameters: Some(DiffusionParameters {
                negative_prompt: diffusion::NEGATIVE_PROMPT.to_string(),
                num_inference_steps: inference_steps(quality),
                guidance_scale: diffusion::GUIDANCE_SCALE,
                height,
                width,
            }),
        }
    }
}

fn quality_guide(quality: &str) -> Option<&'static str> {
    match quality {
        "low" => Some("Quick draft quality"),
        "medium" => Some("Good quality, balanced detail"),
        "high" => Some("Ultra high quality, maximum detail, professional grade, 8K resolution"),
        _ => None,
    }
}

/// Append quality and style hints to a prompt
pub fn enhance_prompt(prompt: &str, style: Option<&str>, quality: Option<&str>) -> String {
    let mut enhanced = prompt.to_string();

    if let Some(guide) = quality.and_then(quality_guide) {
        enhanced.push_str(". ");
        enhanced.push_str(guide);
    }

    if let Some(style) = style.filter(|s| !s.is_empty() && *s != "default") {
        enhanced.push_str(". Style: ");
        enhanced.push_str(style);
    }

    enhanced
}

/// Diffusion step count for a quality level
pub fn inference_steps(quality: Option<&str>) -> u32 {
    match quality {
        Some("high") => 50,
        Some("medium") => 30,
        _ => 20,
    }
}

/// Parse a `WIDTHxHEIGHT` size string
fn parse_size(size: &str) -> Option<(u32, u32)> {
    let (width, height) = size.trim().split_once(['x', 'X'])?;
    let width = width.trim().parse::<u32>().ok().filter(|w| *w > 0)?;
    let height = height.trim().parse::<u32>().ok().filter(|h| *h > 0)?;
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_model() {
        let manager = ModelManager::new();
        assert_eq!(
            manager.resolve("dreamshaper").unwrap().model_id,
            "Lykon/dreamshaper-8"
        );
    }

    #[test]
    fn test_resolve_unknown_model() {
        let err = ModelManager::new().resolve("midjourney").unwrap_err();
        assert_eq!(err, ProviderError::UnknownModel("midjourney".to_string()));
        assert_eq!(err.to_string(), "Model midjourney not found");
    }

    #[test]
    fn test_enhance_prompt() {
        assert_eq!(
            enhance_prompt("A cat", Some("watercolor"), Some("low")),
            "A cat. Quick draft quality. Style: watercolor"
        );
        assert_eq!(enhance_prompt("A cat", Some("default"), Some("ultra")), "A cat");
        assert_eq!(enhance_prompt("A cat", None, None), "A cat");
    }

    #[test]
    fn test_inference_steps() {
        assert_eq!(inference_steps(Some("high")), 50);
        assert_eq!(inference_steps(Some("medium")), 30);
        assert_eq!(inference_steps(Some("low")), 20);
        assert_eq!(inference_steps(None), 20);
    }

    #[test]
    fn test_build_request_size() {
        let manager = ModelManager::new();
        let params = manager
            .build_request("A cat", None, Some("medium"), Some("1024x512"))
            .parameters
            .unwrap();
        assert_eq!((params.width, params.height), (1024, 512));
        assert_eq!(params.num_inference_steps, 30);
        assert_eq!(params.guidance_scale, 7.5);

        let params = manager
            .build_request("A cat", None, None, Some("huge"))
            .parameters
            .unwrap();
        assert_eq!((params.width, params.height), (768, 768));
    }

    #[test]
    fn test_model_listing_order() {
        let ids: Vec<String> = ModelManager::new()
            .model_infos()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["stable-diffusion-xl", "stable-diffusion-3", "dreamshaper"]);
    }
}
