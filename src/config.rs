use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::studio::MAX_HISTORY;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a world-class AI assistant. Provide concise, helpful, and accurate responses. Format with Markdown where appropriate.";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_chat_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_system_instruction() -> String {
    DEFAULT_SYSTEM_INSTRUCTION.to_string()
}

fn default_aspect_ratio() -> String {
    "1:1".to_string()
}

fn default_history_limit() -> usize {
    MAX_HISTORY
}

fn default_download_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join("Downloads"),
        None => PathBuf::from("."),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub studio: StudioConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudioConfig {
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            chat_model: default_chat_model(),
            image_model: default_image_model(),
            system_instruction: default_system_instruction(),
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1280,
            height: 800,
            min_width: 480,
            min_height: 360,
        }
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            history_limit: default_history_limit(),
            download_dir: default_download_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Config::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "error parsing config.toml, using defaults"),
            },
            Err(e) => tracing::warn!(error = %e, "error reading config.toml, using defaults"),
        }

        Config::default()
    }

    /// Parse a config document, normalizing out-of-range values.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        config.studio.history_limit = config.studio.history_limit.clamp(1, MAX_HISTORY);
        config.gemini.base_url = config.gemini.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_config_dir() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config/gemini-studio")
        } else {
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
