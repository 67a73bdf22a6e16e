// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::discord::{DiscordClient, DISCORD_API_BASE};

pub const ENV_BOT_TOKEN: &str = "DISCORD_BOT_TOKEN";
pub const ENV_FORUM_CHANNEL_ID: &str = "DISCORD_FORUM_CHANNEL_ID";
pub const ENV_API_BASE: &str = "DISCORD_API_BASE";
pub const ENV_ENVIRONMENT: &str = "APP_ENV";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Discord bot token, sent as `Authorization: Bot <token>`
    #[serde(default)]
    pub bot_token: String,

    /// Forum channel that receives one thread per GitHub item
    #[serde(default)]
    pub forum_channel_id: String,

    /// REST API root (default: https://discord.com/api/v10)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// "production" selects JSON logs at info level; anything else is pretty debug output
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_api_base() -> String {
    DISCORD_API_BASE.to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            forum_channel_id: String::new(),
            api_base: default_api_base(),
            environment: default_environment(),
        }
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.bot_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("BridgeConfig")
            .field("bot_token", &token)
            .field("forum_channel_id", &self.forum_channel_id)
            .field("api_base", &self.api_base)
            .field("environment", &self.environment)
            .finish()
    }
}

impl BridgeConfig {
    /// Override fields from environment variables. Only non-empty values apply.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = get(ENV_BOT_TOKEN) {
            self.bot_token = token;
        }
        if let Some(channel) = get(ENV_FORUM_CHANNEL_ID) {
            self.forum_channel_id = channel;
        }
        if let Some(base) = get(ENV_API_BASE) {
            self.api_base = base;
        }
        if let Some(env) = get(ENV_ENVIRONMENT) {
            self.environment = env;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("Discord bot token is not set (bot_token or {ENV_BOT_TOKEN})");
        }
        if self.forum_channel_id.trim().is_empty() {
            anyhow::bail!(
                "Discord forum channel id is not set (forum_channel_id or {ENV_FORUM_CHANNEL_ID})"
            );
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Validate and build a client for the configured forum.
    pub fn client(&self) -> Result<DiscordClient> {
        self.validate()?;
        Ok(DiscordClient::new(&self.bot_token, &self.forum_channel_id)
            .with_api_base(&self.api_base))
    }
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("bridge.toml")
}

/// `<user config dir>/gh-discord-bridge/bridge.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| config_path(&dir.join("gh-discord-bridge")))
}

pub fn load_config(path: &Path) -> Result<Option<BridgeConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config: BridgeConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config at {}", path.display()))?;
    Ok(Some(config))
}

pub fn save_config(path: &Path, config: &BridgeConfig) -> Result<()> {
    let toml = toml::to_string_pretty(config)?;
    std::fs::write(path, toml)?;
    Ok(())
}

/// Load `path` (if present), then apply process environment overrides.
pub fn resolve(path: Option<&Path>) -> Result<BridgeConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?.unwrap_or_default(),
        None => BridgeConfig::default(),
    };
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}
