//! Integration tests for configuration resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Every test that reads or writes VESTIRE_* / AI_MODEL_TYPE / *_API_KEY
//! is marked with #[serial].

use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use vestire_common::config::{
    config_file_path, ConfigOverrides, GeneratorProvider, TomlConfig, ENV_CLAUDE_API_KEY,
    ENV_CONFIG_PATH, ENV_GEMINI_API_KEY, ENV_MODEL_TYPE, ENV_PORT,
};

fn clear_env() {
    for var in [
        ENV_CONFIG_PATH,
        ENV_PORT,
        ENV_MODEL_TYPE,
        ENV_GEMINI_API_KEY,
        ENV_CLAUDE_API_KEY,
    ] {
        env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn overrides_for(file: &NamedTempFile) -> ConfigOverrides {
    ConfigOverrides {
        config_path: Some(file.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
#[serial]
fn test_missing_config_file_falls_back_to_defaults() {
    clear_env();

    let overrides = ConfigOverrides {
        config_path: Some(PathBuf::from("/nonexistent/vestire-test-12345.toml")),
        ..Default::default()
    };

    let config = TomlConfig::load(overrides).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_toml_values_are_loaded() {
    clear_env();

    let file = write_config(
        r#"
        [server]
        host = "0.0.0.0"
        port = 8080

        [logging]
        level = "debug"

        [generator]
        provider = "claude"
        api_key = "from-toml"
        timeout_ms = 5000

        [recommendation]
        max_outfits = 2
        "#,
    );

    let config = TomlConfig::load(overrides_for(&file)).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.generator.provider, GeneratorProvider::Claude);
    assert_eq!(config.generator.api_key.as_deref(), Some("from-toml"));
    assert_eq!(config.generator.timeout_ms, 5000);
    assert_eq!(config.recommendation.max_outfits, 2);
    // Unspecified field keeps its default
    assert_eq!(config.recommendation.min_closet_size, 3);
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();

    let file = write_config(
        r#"
        [server]
        port = 8080

        [generator]
        provider = "gemini"
        "#,
    );

    env::set_var(ENV_PORT, "9090");
    env::set_var(ENV_MODEL_TYPE, "claude");
    env::set_var(ENV_CLAUDE_API_KEY, "claude-env-key");
    env::set_var(ENV_GEMINI_API_KEY, "gemini-env-key");

    let config = TomlConfig::load(overrides_for(&file)).unwrap();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.generator.provider, GeneratorProvider::Claude);
    // Key follows the selected provider
    assert_eq!(config.generator.api_key.as_deref(), Some("claude-env-key"));

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();

    env::set_var(ENV_PORT, "9090");
    env::set_var(ENV_MODEL_TYPE, "claude");

    let overrides = ConfigOverrides {
        config_path: Some(PathBuf::from("/nonexistent/vestire-test-cli.toml")),
        port: Some(7000),
        provider: Some(GeneratorProvider::Disabled),
        api_key: Some("cli-key".to_string()),
        log_level: Some("warn".to_string()),
        ..Default::default()
    };

    let config = TomlConfig::load(overrides).unwrap();
    assert_eq!(config.server.port, 7000);
    assert_eq!(config.generator.provider, GeneratorProvider::Disabled);
    assert_eq!(config.generator.api_key.as_deref(), Some("cli-key"));
    assert_eq!(config.logging.level, "warn");
    assert!(!config.generator.is_usable());

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_port_is_ignored() {
    clear_env();
    env::set_var(ENV_PORT, "not-a-port");

    let overrides = ConfigOverrides {
        config_path: Some(PathBuf::from("/nonexistent/vestire-test-port.toml")),
        ..Default::default()
    };

    let config = TomlConfig::load(overrides).unwrap();
    assert_eq!(config.server.port, 5740);

    clear_env();
}

#[test]
#[serial]
fn test_malformed_toml_is_an_error() {
    clear_env();

    let file = write_config("[server\nport = ");
    let result = TomlConfig::load(overrides_for(&file));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_zero_max_outfits_rejected() {
    clear_env();

    let file = write_config(
        r#"
        [recommendation]
        max_outfits = 0
        "#,
    );
    assert!(TomlConfig::load(overrides_for(&file)).is_err());
}

#[test]
#[serial]
fn test_config_path_from_env() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "/tmp/vestire-env-config.toml");

    assert_eq!(
        config_file_path(None),
        Some(PathBuf::from("/tmp/vestire-env-config.toml"))
    );
    // Explicit path wins over the environment
    assert_eq!(
        config_file_path(Some(&PathBuf::from("/tmp/explicit.toml"))),
        Some(PathBuf::from("/tmp/explicit.toml"))
    );

    clear_env();
}

#[test]
fn test_toml_roundtrip() {
    let mut config = TomlConfig::default();
    config.generator.provider = GeneratorProvider::Claude;
    config.generator.api_url = Some("http://localhost:9000/v1/messages".to_string());

    let toml_str = toml::to_string(&config).unwrap();
    let parsed: TomlConfig = toml::from_str(&toml_str).unwrap();

    assert_eq!(parsed, config);
}

#[test]
fn test_empty_toml_is_all_defaults() {
    let parsed: TomlConfig = toml::from_str("").unwrap();
    assert_eq!(parsed, TomlConfig::default());
}
