//! Application settings and configuration structures.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat, FileSourceFile};
use serde::Deserialize;

use super::credentials::{ApiKeys, Provider};
use super::env::{ReadEnv, SystemEnv};
use super::env_file::{EnvFile, EnvFileStatus};
use crate::shared::error::{Result, SettingsError};

/// Log levels accepted in `LOG_LEVEL`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Non-credential environment variables read by the loader.
pub const SETTING_VARS: [&str; 21] = [
    "RUN_ENV",
    "NODE_ENV",
    "HOST",
    "PORT",
    "CORS_ORIGIN",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "LOG_DIR",
    "CACHE_TYPE",
    "CACHE_TTL",
    "CACHE_MAX_SIZE",
    "REDIS_HOST",
    "REDIS_PORT",
    "REDIS_PASSWORD",
    "GROK_TIMEOUT",
    "GROK_MODEL",
    "GROK_MAX_RETRIES",
    "CLAUDE_TIMEOUT",
    "CLAUDE_MODEL",
    "GEMINI_TIMEOUT",
    "GEMINI_MODEL",
];

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Current environment (development, test, production)
    pub environment: String,

    /// HTTP server binding and CORS
    pub server: ServerSettings,

    /// Logging level, format and optional file output
    pub logging: LoggingSettings,

    /// Response cache configuration
    pub cache: CacheSettings,

    /// Per-provider model client settings
    pub ai: AiSettings,

    /// Third-party API keys, read from the environment only
    #[serde(skip)]
    pub api_keys: ApiKeys,

    /// What happened to the optional env file during loading
    #[serde(skip)]
    pub env_file: EnvFileStatus,

    /// Variables that were set but ignored because their value is not UTF-8
    #[serde(skip)]
    pub ignored_vars: Vec<String>,
}

/// Server binding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,

    /// Port number to listen on
    pub port: u16,

    pub cors: CorsSettings,
}

/// CORS configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorsSettings {
    /// Allowed origin (`*` for any)
    pub origin: String,
    pub methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// One of [`LOG_LEVELS`]
    pub level: String,

    pub format: LogFormat,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheSettings {
    pub kind: CacheKind,

    /// Entry time-to-live in seconds
    pub ttl_secs: u64,

    /// Maximum number of entries in the memory cache
    pub max_size: usize,

    pub redis: RedisSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    Memory,
    Redis,
}

/// Redis connection used when `cache.kind` is `redis`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub password: String,
}

/// Model client settings per provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AiSettings {
    pub grok: GrokSettings,
    pub claude: ModelSettings,
    pub gemini: ModelSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrokSettings {
    pub timeout_ms: u64,
    pub model: String,
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelSettings {
    pub timeout_ms: u64,
    pub model: String,
}

/// Builds [`Settings`] from defaults, config files and the environment.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    env_file: EnvFile,
    config_dir: Option<PathBuf>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self {
            env_file: EnvFile::Discover,
            config_dir: Some(PathBuf::from("config")),
        }
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose which env file is merged by [`SettingsLoader::load`].
    pub fn env_file(mut self, env_file: EnvFile) -> Self {
        self.env_file = env_file;
        self
    }

    /// Directory searched for `default.*` and `{environment}.*` files.
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    pub fn without_config_files(mut self) -> Self {
        self.config_dir = None;
        self
    }

    /// Merge the env file into the process environment, then load from it.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the env file is malformed or any
    /// non-credential setting cannot be parsed.
    pub fn load(&self) -> Result<Settings> {
        let env_file = self.env_file.merge_into_process()?;
        let mut settings = self.load_from(&SystemEnv)?;
        settings.env_file = env_file;
        settings.ignored_vars = SystemEnv::non_unicode(
            SETTING_VARS
                .into_iter()
                .chain(Provider::ALL.into_iter().map(Provider::env_var)),
        );
        Ok(settings)
    }

    /// Load settings from `env` without touching any env file.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. {config_dir}/default (optional)
    /// 3. {config_dir}/{environment} (optional)
    /// 4. Environment variables (highest priority)
    ///
    /// Unset credentials are `None`, never an error.
    pub fn load_from(&self, env: &impl ReadEnv) -> Result<Settings> {
        // Determine the running environment
        let environment = env
            .var("RUN_ENV")
            .or_else(|| env.var("NODE_ENV"))
            .unwrap_or_else(|| "development".into());
        let production = environment == "production";

        let mut builder = Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "localhost")?
            .set_default("server.port", 3002)?
            .set_default("server.cors.origin", "*")?
            .set_default("server.cors.methods", vec!["GET", "POST", "PUT", "DELETE"])?
            .set_default(
                "server.cors.allowed_headers",
                vec!["Content-Type", "Authorization"],
            )?
            .set_default("logging.level", if production { "info" } else { "debug" })?
            .set_default("logging.format", if production { "json" } else { "pretty" })?
            .set_default("cache.kind", "memory")?
            .set_default("cache.ttl_secs", 600)?
            .set_default("cache.max_size", 1000)?
            .set_default("cache.redis.host", "localhost")?
            .set_default("cache.redis.port", 6379)?
            .set_default("cache.redis.password", "")?
            .set_default("ai.grok.timeout_ms", 30000)?
            .set_default("ai.grok.model", "grok-3-beta")?
            .set_default("ai.grok.max_retries", 2)?
            .set_default("ai.claude.timeout_ms", 60000)?
            .set_default("ai.claude.model", "claude-3-haiku-20240307")?
            .set_default("ai.gemini.timeout_ms", 30000)?
            .set_default("ai.gemini.model", "gemini-1.5-flash-8b")?;

        // Load from config files
        if let Some(dir) = &self.config_dir {
            builder = builder
                .add_source(config_file(dir, "default"))
                .add_source(config_file(dir, &environment));
        }

        // Map plain environment variables
        let lowercase = |key: &str| env.var(key).map(|v| v.to_ascii_lowercase());
        let settings: Settings = builder
            .set_override("environment", environment.clone())?
            .set_override_option("server.host", env.var("HOST"))?
            .set_override_option("server.port", env.var("PORT"))?
            .set_override_option("server.cors.origin", env.var("CORS_ORIGIN"))?
            .set_override_option("logging.level", env.var("LOG_LEVEL"))?
            .set_override_option("logging.format", lowercase("LOG_FORMAT"))?
            .set_override_option("logging.directory", env.var("LOG_DIR"))?
            .set_override_option("cache.kind", lowercase("CACHE_TYPE"))?
            .set_override_option("cache.ttl_secs", env.var("CACHE_TTL"))?
            .set_override_option("cache.max_size", env.var("CACHE_MAX_SIZE"))?
            .set_override_option("cache.redis.host", env.var("REDIS_HOST"))?
            .set_override_option("cache.redis.port", env.var("REDIS_PORT"))?
            .set_override_option("cache.redis.password", env.var("REDIS_PASSWORD"))?
            .set_override_option("ai.grok.timeout_ms", env.var("GROK_TIMEOUT"))?
            .set_override_option("ai.grok.model", env.var("GROK_MODEL"))?
            .set_override_option("ai.grok.max_retries", env.var("GROK_MAX_RETRIES"))?
            .set_override_option("ai.claude.timeout_ms", env.var("CLAUDE_TIMEOUT"))?
            .set_override_option("ai.claude.model", env.var("CLAUDE_MODEL"))?
            .set_override_option("ai.gemini.timeout_ms", env.var("GEMINI_TIMEOUT"))?
            .set_override_option("ai.gemini.model", env.var("GEMINI_MODEL"))?
            .build()?
            .try_deserialize()?;

        let mut settings = Settings {
            api_keys: ApiKeys::from_env(env),
            ..settings
        };
        settings.logging.level.make_ascii_lowercase();
        settings.validate()?;

        tracing::debug!(
            environment = %settings.environment,
            configured_keys = settings.api_keys.configured().count(),
            "Settings loaded"
        );
        Ok(settings)
    }
}

fn config_file(dir: &Path, name: &str) -> File<FileSourceFile, FileFormat> {
    File::with_name(&dir.join(name).to_string_lossy()).required(false)
}

impl Settings {
    /// Load settings with the default loader: discover `.env`, read
    /// `config/`, then the process environment.
    pub fn load() -> Result<Self> {
        SettingsLoader::default().load()
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_test(&self) -> bool {
        self.environment == "test"
    }

    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(SettingsError::InvalidLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}

impl ModelSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

impl GrokSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_secs)
    }
}
