//! String constants for console output and fallback values
//!
//! This module defines the report markers, placeholders and service
//! identifiers used throughout the application.

/// Console report text
pub mod report {
    /// Marker prefixed to success lines
    pub const SUCCESS: &str = "✓";

    /// Marker prefixed to failure lines
    pub const FAILURE: &str = "✗";

    /// Number of credential characters shown before masking
    pub const CREDENTIAL_PREFIX_LEN: usize = 20;
}

/// Values substituted when a response lacks the expected field
pub mod fallback {
    /// Text probe result when the first candidate has no text
    pub const NO_CONTENT: &str = "No content";

    /// Error message when an error payload has no `error.message`
    pub const UNKNOWN_ERROR: &str = "Unknown error";
}

/// Image backend identity
pub mod service {
    /// Root endpoint message
    pub const MESSAGE: &str = "CodeBloom AI Hub Backend";

    /// Service name reported by the health check
    pub const NAME: &str = "codebloom-ai-hub";

    /// Model used when a request does not name one
    pub const DEFAULT_MODEL: &str = "stable-diffusion-xl";

    /// Quality used when a request does not name one
    pub const DEFAULT_QUALITY: &str = "high";

    /// Size used when a request does not name one
    pub const DEFAULT_SIZE: &str = "768x768";
}

/// Diffusion parameters sent with every backend generation request
pub mod diffusion {
    pub const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, ugly";

    pub const GUIDANCE_SCALE: f32 = 7.5;

    /// Edge length used when the requested size cannot be parsed
    pub const DEFAULT_EDGE: u32 = 768;

    /// Status the Hugging Face router answers with for retired routes
    pub const ROUTER_GONE: u16 = 410;

    pub const TIMEOUT_MESSAGE: &str = "Request timeout - image generation took too long";
}
