// src/logger.rs
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const SERVICE_NAME: &str = "github-discord-bridge";

/// Default verbosity for an environment; `RUST_LOG` still wins.
pub fn default_level(environment: &str) -> LevelFilter {
    if environment == "production" {
        LevelFilter::INFO
    } else {
        LevelFilter::DEBUG
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Production gets one JSON object per line; every other environment gets
/// pretty, human-oriented output. Returns `false` when a global subscriber
/// was already installed, in which case nothing changes.
pub fn init(environment: &str) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(environment).into())
        .from_env_lossy();

    let installed = if environment == "production" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };
    if installed.is_err() {
        return false;
    }

    tracing::debug!(service = SERVICE_NAME, environment, "logger initialized");
    true
}
