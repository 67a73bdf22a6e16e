// tests/config_tests.rs
use gh_discord_bridge::config::{config_path, load_config, save_config, BridgeConfig};
use gh_discord_bridge::discord::DISCORD_API_BASE;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_config_defaults() {
    let config = BridgeConfig::default();
    assert!(config.bot_token.is_empty());
    assert!(config.forum_channel_id.is_empty());
    assert_eq!(config.api_base, DISCORD_API_BASE);
    assert_eq!(config.environment, "development");
    assert!(!config.is_production());
}

#[test]
fn test_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_path(dir.path());

    let config = BridgeConfig {
        bot_token: "tok".to_string(),
        forum_channel_id: "123".to_string(),
        environment: "production".to_string(),
        ..Default::default()
    };

    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap().unwrap();

    assert_eq!(loaded, config);
    assert!(loaded.is_production());
}

#[test]
fn test_config_load_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonexistent.toml");
    let loaded = load_config(&path).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_config_partial_toml_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_path(dir.path());
    std::fs::write(&path, "forum_channel_id = \"555\"\n").unwrap();

    let loaded = load_config(&path).unwrap().unwrap();
    assert_eq!(loaded.forum_channel_id, "555");
    assert!(loaded.bot_token.is_empty());
    assert_eq!(loaded.api_base, DISCORD_API_BASE);
    assert_eq!(loaded.environment, "development");
}

#[test]
fn test_config_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_path(dir.path());
    std::fs::write(&path, "bot_token = [not toml").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_env_overrides_all() {
    let mut config = BridgeConfig {
        bot_token: "file-token".to_string(),
        forum_channel_id: "file-channel".to_string(),
        ..Default::default()
    };
    let vars = env(&[
        ("DISCORD_BOT_TOKEN", "env-token"),
        ("DISCORD_FORUM_CHANNEL_ID", "env-channel"),
        ("DISCORD_API_BASE", "http://localhost:9000"),
        ("APP_ENV", "production"),
    ]);

    config.apply_env_overrides(|key| vars.get(key).cloned());

    assert_eq!(config.bot_token, "env-token");
    assert_eq!(config.forum_channel_id, "env-channel");
    assert_eq!(config.api_base, "http://localhost:9000");
    assert!(config.is_production());
}

#[test]
fn test_env_overrides_ignore_empty_values() {
    let mut config = BridgeConfig {
        bot_token: "file-token".to_string(),
        forum_channel_id: "file-channel".to_string(),
        ..Default::default()
    };
    let vars = env(&[("DISCORD_BOT_TOKEN", ""), ("APP_ENV", "  ")]);

    config.apply_env_overrides(|key| vars.get(key).cloned());

    assert_eq!(config.bot_token, "file-token"); // unchanged
    assert_eq!(config.forum_channel_id, "file-channel"); // unchanged
    assert_eq!(config.environment, "development"); // unchanged
}

#[test]
fn test_validate_requires_token_and_channel() {
    let mut config = BridgeConfig::default();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("DISCORD_BOT_TOKEN"));

    config.bot_token = "tok".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("DISCORD_FORUM_CHANNEL_ID"));

    config.forum_channel_id = "123".to_string();
    config.validate().unwrap();
}

#[test]
fn test_client_uses_configured_channel_and_base() {
    let config = BridgeConfig {
        bot_token: "tok".to_string(),
        forum_channel_id: "123".to_string(),
        api_base: "http://localhost:9000/".to_string(),
        ..Default::default()
    };
    let client = config.client().unwrap();
    assert_eq!(client.forum_channel_id(), "123");
    assert_eq!(client.api_base(), "http://localhost:9000");
}

#[test]
fn test_debug_redacts_token() {
    let config = BridgeConfig {
        bot_token: "super-secret".to_string(),
        ..Default::default()
    };
    let debug = format!("{config:?}");
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("super-secret"));
}

#[test]
fn test_config_path() {
    let dir = std::path::Path::new("/some/project");
    assert_eq!(
        config_path(dir),
        std::path::PathBuf::from("/some/project/bridge.toml")
    );
}
