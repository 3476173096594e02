//! API data models
//!
//! This module contains data structures for the Gemini and Hugging Face APIs
//! and for the image backend's own HTTP surface.

pub mod gemini;
pub mod huggingface;
pub mod image;
