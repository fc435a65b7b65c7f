//! Configuration loading for Vestire services
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. TOML config file
//! 4. Compiled defaults (fallback)
//!
//! A missing TOML file is never fatal: a warning is logged and the compiled
//! defaults are used. A TOML file that exists but fails to parse is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const ENV_CONFIG_PATH: &str = "VESTIRE_CONFIG";
/// Environment variable overriding the HTTP port
pub const ENV_PORT: &str = "VESTIRE_PORT";
/// Environment variable selecting the generator provider
pub const ENV_MODEL_TYPE: &str = "AI_MODEL_TYPE";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_CLAUDE_API_KEY: &str = "CLAUDE_API_KEY";

pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";
pub const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub recommendation: RecommendationConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// Default: 5740
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stdout if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Which external generative service backs outfit generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorProvider {
    #[default]
    Gemini,
    Claude,
    /// Skip the generator entirely and go straight to local assembly
    Disabled,
}

impl GeneratorProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorProvider::Gemini => "gemini",
            GeneratorProvider::Claude => "claude",
            GeneratorProvider::Disabled => "disabled",
        }
    }

    /// Endpoint used when the config does not name one
    pub fn default_api_url(&self) -> Option<&'static str> {
        match self {
            GeneratorProvider::Gemini => Some(GEMINI_API_URL),
            GeneratorProvider::Claude => Some(CLAUDE_API_URL),
            GeneratorProvider::Disabled => None,
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            GeneratorProvider::Gemini => Some(ENV_GEMINI_API_KEY),
            GeneratorProvider::Claude => Some(ENV_CLAUDE_API_KEY),
            GeneratorProvider::Disabled => None,
        }
    }
}

impl std::fmt::Display for GeneratorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(GeneratorProvider::Gemini),
            "claude" => Ok(GeneratorProvider::Claude),
            "disabled" | "none" | "off" => Ok(GeneratorProvider::Disabled),
            other => Err(Error::InvalidInput(format!(
                "Unknown generator provider: {}",
                other
            ))),
        }
    }
}

/// Generator adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub provider: GeneratorProvider,

    /// API key (usually supplied through the environment instead)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Endpoint override; provider default when absent
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default = "default_generator_timeout_ms")]
    pub timeout_ms: u64,
}

impl GeneratorConfig {
    /// Endpoint to call, falling back to the provider default
    pub fn effective_api_url(&self) -> Option<String> {
        self.api_url
            .clone()
            .or_else(|| self.provider.default_api_url().map(str::to_string))
    }

    /// True when a provider is selected and a key is present
    pub fn is_usable(&self) -> bool {
        self.provider != GeneratorProvider::Disabled
            && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Recommendation pipeline limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Closets smaller than this are rejected up front
    #[serde(default = "default_min_closet_size")]
    pub min_closet_size: usize,

    #[serde(default = "default_max_outfits")]
    pub max_outfits: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5740
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_generator_timeout_ms() -> u64 {
    20_000
}

fn default_min_closet_size() -> usize {
    3
}

fn default_max_outfits() -> usize {
    3
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: GeneratorProvider::default(),
            api_key: None,
            api_url: None,
            timeout_ms: default_generator_timeout_ms(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            min_closet_size: default_min_closet_size(),
            max_outfits: default_max_outfits(),
        }
    }
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub provider: Option<GeneratorProvider>,
    pub api_key: Option<String>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Resolve the full configuration (CLI > ENV > TOML > defaults)
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match config_file_path(overrides.config_path.as_deref()) {
            Some(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                info!(path = %path.display(), "Loaded TOML configuration");
                config
            }
            Some(path) => {
                warn!(
                    path = %path.display(),
                    "Config file not found, using compiled defaults"
                );
                Self::default()
            }
            None => {
                warn!("No config file found, using compiled defaults");
                Self::default()
            }
        };

        config.apply_env();
        config.apply_overrides(overrides);
        config.validate()?;

        debug!(
            host = %config.server.host,
            port = config.server.port,
            provider = %config.generator.provider,
            has_api_key = config.generator.api_key.is_some(),
            "Configuration resolved"
        );

        Ok(config)
    }

    /// Layer environment variables over the file values
    fn apply_env(&mut self) {
        if let Ok(port) = std::env::var(ENV_PORT) {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid {}", ENV_PORT),
            }
        }

        if let Ok(model) = std::env::var(ENV_MODEL_TYPE) {
            match model.parse::<GeneratorProvider>() {
                Ok(provider) => self.generator.provider = provider,
                Err(e) => warn!(error = %e, "Ignoring invalid {}", ENV_MODEL_TYPE),
            }
        }
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(provider) = overrides.provider {
            self.generator.provider = provider;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }

        // Key lookup depends on the final provider, so it runs last
        if let Some(key) = overrides.api_key {
            self.generator.api_key = Some(key);
        } else if let Some(var) = self.generator.provider.api_key_env() {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    self.generator.api_key = Some(key);
                }
            }
        }
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.recommendation.min_closet_size == 0 {
            return Err(Error::Config(
                "recommendation.min_closet_size must be at least 1".to_string(),
            ));
        }
        if self.recommendation.max_outfits == 0 {
            return Err(Error::Config(
                "recommendation.max_outfits must be at least 1".to_string(),
            ));
        }
        if self.generator.timeout_ms == 0 {
            return Err(Error::Config(
                "generator.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Locate the config file: explicit path, then `VESTIRE_CONFIG`, then the
/// per-user config dir, then `/etc/vestire/config.toml`.
///
/// Returns the explicit path even when it does not exist so the caller can
/// report it.
pub fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(path));
    }

    let user_config = dirs::config_dir().map(|d| d.join("vestire").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/vestire/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.server.port, 5740);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.generator.provider, GeneratorProvider::Gemini);
        assert_eq!(config.recommendation.min_closet_size, 3);
        assert_eq!(config.recommendation.max_outfits, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("Claude".parse::<GeneratorProvider>().unwrap(), GeneratorProvider::Claude);
        assert_eq!("off".parse::<GeneratorProvider>().unwrap(), GeneratorProvider::Disabled);
        assert!("openai".parse::<GeneratorProvider>().is_err());
    }

    #[test]
    fn test_effective_api_url() {
        let mut generator = GeneratorConfig::default();
        assert_eq!(generator.effective_api_url().as_deref(), Some(GEMINI_API_URL));

        generator.provider = GeneratorProvider::Disabled;
        assert_eq!(generator.effective_api_url(), None);

        generator.api_url = Some("http://localhost:9000".to_string());
        assert_eq!(generator.effective_api_url().as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_is_usable_requires_key() {
        let mut generator = GeneratorConfig::default();
        assert!(!generator.is_usable());

        generator.api_key = Some("   ".to_string());
        assert!(!generator.is_usable());

        generator.api_key = Some("abc".to_string());
        assert!(generator.is_usable());

        generator.provider = GeneratorProvider::Disabled;
        assert!(!generator.is_usable());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = TomlConfig::default();
        config.recommendation.max_outfits = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
