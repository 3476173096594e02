//! Application configuration management
//!
//! Endpoints, prompts and generation parameters are loaded from a TOML file.
//! Credentials are never part of that file: they are read from the
//! environment (after `.env` has been loaded) and validated before use.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variables holding the Hugging Face token, in lookup order
pub const HUGGING_FACE_TOKEN_VARS: [&str; 2] = ["HUGGING_FACE_TOKEN", "HF_TOKEN"];

/// Default image backend port
const DEFAULT_PORT: u16 = 8000;

/// Default upstream timeout for image generation, in seconds
const DEFAULT_GENERATION_TIMEOUT: u64 = 120;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            prompt: "Write a short poem about technology".to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HuggingFaceSettings {
    /// Direct inference API, used by the probe and as the router fallback
    pub inference_url: String,
    pub router_url: String,
    pub probe_model: String,
    pub probe_prompt: String,
}

impl Default for HuggingFaceSettings {
    fn default() -> Self {
        Self {
            inference_url: "https://api-inference.huggingface.co/models".to_string(),
            router_url: "https://router.huggingface.co/models".to_string(),
            probe_model: "stabilityai/stable-diffusion-xl-base-1.0".to_string(),
            probe_prompt: "A beautiful sunset over mountains, high quality, 8K".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub generation_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Probe timeout in seconds; unset means no client-side timeout
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub gemini: GeminiSettings,
    pub huggingface: HuggingFaceSettings,
    pub server: ServerConfig,
    pub request: RequestConfig,
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gemini: GeminiSettings,
    pub huggingface: HuggingFaceSettings,
    pub server: ServerConfig,
    pub request: RequestConfig,

    /// Gemini API key, injected from the environment
    pub gemini_api_key: Option<String>,

    /// Hugging Face access token, injected from the environment
    pub huggingface_token: Option<String>,
}

impl Config {
    /// Parse configuration from TOML text, without credentials
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).context("Failed to parse TOML configuration")?;

        let config = Config {
            gemini: config.gemini,
            huggingface: config.huggingface,
            server: config.server,
            request: config.request,
            gemini_api_key: None,
            huggingface_token: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or if a value is
    /// out of range
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `$CONFIG_PATH` (or `config.toml`) plus the
    /// environment
    ///
    /// A missing `config.toml` falls back to defaults; a missing file named by
    /// `CONFIG_PATH` is an error.
    pub fn from_env() -> Result<Self> {
        let config = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::from_file(&path)
                .with_context(|| format!("Failed to load configuration from {}", path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Config::default(),
        };

        Ok(config.with_credentials(|name| std::env::var(name).ok()))
    }

    /// Fill credentials from a variable lookup; blank values count as unset
    pub fn with_credentials<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        self.gemini_api_key = read(GEMINI_API_KEY_VAR);
        self.huggingface_token = HUGGING_FACE_TOKEN_VARS.iter().find_map(|name| read(*name));
        self
    }

    fn validate(&self) -> Result<()> {
        let gemini = &self.gemini;
        anyhow::ensure!(
            (0.0..=2.0).contains(&gemini.temperature),
            "gemini.temperature must be between 0.0 and 2.0"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&gemini.top_p),
            "gemini.top_p must be between 0.0 and 1.0"
        );
        anyhow::ensure!(gemini.max_output_tokens > 0, "gemini.max_output_tokens must be positive");
        anyhow::ensure!(!gemini.model.is_empty(), "gemini.model must not be empty");
        anyhow::ensure!(
            !self.huggingface.probe_model.is_empty(),
            "huggingface.probe_model must not be empty"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [gemini]
            model = "gemini-1.5-pro"
            prompt = "Say hi"
            temperature = 0.2
            top_k = 10

            [huggingface]
            probe_model = "Lykon/dreamshaper-8"

            [server]
            port = 9000
            log_level = "debug"

            [request]
            timeout = 30
        "#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_config() {
        let file = create_test_config();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.top_k, 10);
        assert_eq!(config.gemini.max_output_tokens, 200);
        assert_eq!(config.huggingface.probe_model, "Lykon/dreamshaper-8");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.request.timeout, Some(30));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.gemini, GeminiSettings::default());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.generation_timeout, 120);
        assert_eq!(config.request.timeout, None);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = Config::from_toml_str("[gemini]\ntop_p = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("top_p"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file("/nonexistent/genai-probe.toml").is_err());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let config = Config::default().with_credentials(|name| match name {
            "GEMINI_API_KEY" => Some("  key-123 ".to_string()),
            "HUGGING_FACE_TOKEN" => Some(String::new()),
            "HF_TOKEN" => Some("hf_abc".to_string()),
            _ => None,
        });
        assert_eq!(config.gemini_api_key.as_deref(), Some("key-123"));
        assert_eq!(config.huggingface_token.as_deref(), Some("hf_abc"));
    }
}
