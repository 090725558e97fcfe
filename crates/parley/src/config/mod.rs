use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ParleyError, Result};

/// Main configuration structure for Parley
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Completion API configuration
    #[serde(default)]
    pub rephrase: RephraseConfig,
    /// Restart endpoint configuration
    #[serde(default)]
    pub reload: ReloadConfig,
}

impl Config {
    /// Parse a config file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ParleyError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ParleyError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that are only wrong in combination
    ///
    /// The completion call must give up before the request-wide timeout
    /// fires, otherwise a slow API turns into a 408 instead of a fallback.
    pub fn validate(&self) -> Result<()> {
        if self.server.request_timeout_secs <= self.rephrase.timeout_secs {
            return Err(ParleyError::Config(format!(
                "server.request_timeout_secs ({}) must be greater than rephrase.timeout_secs ({})",
                self.server.request_timeout_secs, self.rephrase.timeout_secs
            )));
        }
        Ok(())
    }

    /// Locations searched when no explicit config path is given, in order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::home_dir().map(|h| h.join(".parley").join("config.toml")),
            dirs::config_dir().map(|c| c.join("parley").join("config.toml")),
            Some(PathBuf::from("config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:4000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Upper bound on a whole request, including the completion call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout_secs(),
            cors: CorsConfig::default(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:4000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Cross-origin configuration
///
/// An empty origin list installs no CORS layer at all, so browsers fall
/// back to same-origin only.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    /// Origins allowed to call the API (e.g., "https://chat.example.com")
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Completion API configuration for the rephraser
#[derive(Debug, Clone, Deserialize)]
pub struct RephraseConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Environment variable name for API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Output length bound for the completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Accept caller-supplied `categoryPrompt` text as the system instruction
    #[serde(default = "default_allow_freeform_prompts")]
    pub allow_freeform_prompts: bool,
}

impl Default for RephraseConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            allow_freeform_prompts: default_allow_freeform_prompts(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    400
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_allow_freeform_prompts() -> bool {
    true
}

/// How `POST /restart` asks the outside world to restart the daemon
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReloadMode {
    /// No restart endpoint is mounted
    #[default]
    Disabled,
    /// Bump the mtime of `touch_path` for a file-watching supervisor
    Touch,
    /// Shut down gracefully and let the process supervisor start us again
    Shutdown,
}

/// Restart endpoint configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReloadConfig {
    #[serde(default)]
    pub mode: ReloadMode,
    /// File watched by the supervisor (required for `touch`)
    #[serde(default)]
    pub touch_path: Option<PathBuf>,
}
