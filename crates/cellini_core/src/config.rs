//! Process configuration.
//!
//! One [`CelliniConfig`] is constructed at process start and passed by
//! reference into every component that needs it; nothing reads configuration
//! ambiently after startup. Values are layered: bundled defaults, then an
//! optional `cellini.toml` (working directory or the user config directory),
//! then `CELLINI_`-prefixed environment variables, then the two API-key
//! environment variables.

use cellini_error::{CelliniResult, ConfigError};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Language-model driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key; populated from `OPENAI_API_KEY`
    api_key: String,
    /// Default chat model
    model: String,
    /// Vision-capable model used when an image is attached and the default
    /// model is not vision-capable
    vision_model: String,
    /// API base URL
    base_url: String,
    /// Fixed request timeout in seconds
    request_timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4.1-nano".to_string(),
            vision_model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Video generation service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ViduConfig {
    /// API key; populated from `VIDU_API_KEY`
    api_key: String,
    /// Service base URL
    base_url: String,
    /// Fixed request timeout in seconds
    request_timeout_secs: u64,
    /// Delay between poll attempts in milliseconds
    poll_interval_ms: u64,
    /// Poll attempt ceiling; interval * attempts bounds total wait
    max_poll_attempts: u32,
}

impl Default for ViduConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.wavespeed.ai/api/v3".to_string(),
            request_timeout_secs: 120,
            poll_interval_ms: 2_000,
            max_poll_attempts: 300,
        }
    }
}

/// Orchestration loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum refine/evaluate iterations before best-effort fallthrough
    max_refinement_iterations: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_refinement_iterations: 3,
        }
    }
}

/// Asset persistence configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory under which per-generation asset directories are created
    asset_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            asset_dir: "video_assets".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen host
    host: String,
    /// Listen port
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Top-level Cellini configuration.
///
/// # Example
///
/// ```no_run
/// use cellini_core::CelliniConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CelliniConfig::load()?;
/// println!("model: {}", config.openai().model());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_getters::Getters,
)]
#[serde(default)]
pub struct CelliniConfig {
    /// Language-model driver settings
    openai: OpenAiConfig,
    /// Video generation service settings
    vidu: ViduConfig,
    /// Orchestration loop settings
    pipeline: PipelineConfig,
    /// Asset persistence settings
    storage: StorageConfig,
    /// HTTP server settings
    server: ServerConfig,
}

impl CelliniConfig {
    /// Load configuration with the standard precedence:
    /// defaults, user config file, working-directory config file,
    /// `CELLINI_`-prefixed environment variables, API-key environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is malformed or deserialization
    /// fails.
    pub fn load() -> CelliniResult<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| ConfigError::new(format!("Failed to build defaults: {}", e)))?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("cellini").join("cellini.toml");
            builder = builder.add_source(File::from(user_path).required(false));
        }
        builder = builder
            .add_source(File::with_name("cellini").required(false))
            .add_source(Environment::with_prefix("CELLINI").separator("__"));

        let mut config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.openai.api_key = key;
        }
        if let Ok(key) = std::env::var("VIDU_API_KEY") {
            config.vidu.api_key = key;
        }

        Ok(config)
    }

    /// Load configuration from a specific TOML file, with defaults and
    /// environment layering.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CelliniResult<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| ConfigError::new(format!("Failed to build defaults: {}", e)))?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_conventions() {
        let config = CelliniConfig::default();
        assert_eq!(config.openai().model(), "gpt-4.1-nano");
        assert_eq!(config.openai().vision_model(), "gpt-4o");
        assert_eq!(config.vidu().base_url(), "https://api.wavespeed.ai/api/v3");
        assert_eq!(*config.vidu().poll_interval_ms(), 2_000);
        assert_eq!(*config.vidu().max_poll_attempts(), 300);
        assert_eq!(*config.pipeline().max_refinement_iterations(), 3);
        assert_eq!(config.storage().asset_dir(), "video_assets");
        assert_eq!(*config.server().port(), 8000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let defaults = Config::try_from(&CelliniConfig::default()).unwrap();
        let config: CelliniConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::from_str(
                "[server]\nport = 9100",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(*config.server().port(), 9100);
        assert_eq!(config.openai().model(), "gpt-4.1-nano");
    }
}
