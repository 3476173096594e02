//! Provider implementations

pub mod gemini;
pub mod huggingface;

pub use gemini::{GeminiProvider, GeneratedText};
pub use huggingface::{GeneratedImage, HuggingFaceProvider};
