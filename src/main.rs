//! # Provider Settings
//!
//! Loads startup settings, initializes logging from them and reports which
//! provider credentials are available. Key values are never printed.

use anyhow::{Context, Result};
use tracing::{info, warn};

use provider_settings::config::{EnvFileStatus, Provider, Settings};
use provider_settings::telemetry;

fn main() -> Result<()> {
    // Load configuration from .env, config files and the environment
    let settings = Settings::load().context("Failed to load settings")?;

    // Initialize tracing subscriber for structured logging
    let _guard = telemetry::init_tracing(&settings.logging)?;

    match &settings.env_file {
        EnvFileStatus::Loaded(path) => info!(path = %path.display(), "Env file merged"),
        EnvFileStatus::NotFound => info!("No env file found"),
        EnvFileStatus::Disabled => info!("Env file disabled"),
    }

    for key in &settings.ignored_vars {
        warn!(key = %key, "Ignored environment variable with non UTF-8 value");
    }

    info!(
        environment = %settings.environment,
        addr = %settings.server_addr(),
        cache = ?settings.cache.kind,
        "Configuration loaded"
    );

    let configured = names(settings.api_keys.configured());
    let missing = names(settings.api_keys.missing());
    info!(providers = %configured, "API keys configured");
    if !missing.is_empty() {
        warn!(providers = %missing, "API keys not set");
    }

    Ok(())
}

fn names(providers: impl Iterator<Item = Provider>) -> String {
    providers.map(|p| p.name()).collect::<Vec<_>>().join(", ")
}
