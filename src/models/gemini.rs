//! Gemini `generateContent` data models
//!
//! Only the request side is typed. Responses are walked as
//! `serde_json::Value` so that a missing or oddly shaped field degrades to a
//! fallback instead of failing the whole decode.

use crate::core::constants::fallback;
use serde::Serialize;
use serde_json::Value;

/// Gemini generateContent request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerateContentRequest {
    /// Build a single-turn request around one prompt
    pub fn single_prompt(prompt: &str, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        }
    }
}

/// Text of the first part of the first candidate, or the "No content" placeholder
pub fn first_candidate_text(response: &Value) -> String {
    response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback::NO_CONTENT)
        .to_string()
}

/// `error.message` of an error payload, or "Unknown error"
pub fn error_message(response: &Value) -> String {
    response
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or(fallback::UNKNOWN_ERROR)
        .to_string()
}
