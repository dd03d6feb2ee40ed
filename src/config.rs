use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Local inference server settings
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Nutrition data settings
    #[serde(default)]
    pub data: DataConfig,
}

/// Configuration for the local Ollama server
#[derive(Debug, Deserialize, Clone)]
pub struct OllamaConfig {
    /// Base URL of the server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model tag (e.g., "llama3.2:1b", "tinyllama")
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Penalty applied to repeated tokens
    #[serde(default = "default_repeat_penalty")]
    pub repeat_penalty: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            repeat_penalty: default_repeat_penalty(),
            timeout: default_timeout(),
        }
    }
}

impl OllamaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Configuration for the nutrition database
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// CSV file with per-100g nutrition values; missing file means built-in data
    #[serde(default = "default_calories_csv")]
    pub calories_csv: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            calories_csv: default_calories_csv(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:1b".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_top_p() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    800
}

fn default_repeat_penalty() -> f32 {
    1.1
}

fn default_timeout() -> u64 {
    120
}

fn default_calories_csv() -> PathBuf {
    PathBuf::from("data").join("calories.csv")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CUISINE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CUISINE__OLLAMA__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the priority order.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: CUISINE__OLLAMA__BASE_URL
        .add_source(
            Environment::with_prefix("CUISINE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
