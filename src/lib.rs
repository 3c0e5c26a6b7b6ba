//! # Provider Settings
//!
//! Startup configuration for the AI content backend:
//! - API keys for OpenAI, Anthropic, Google, Grok, YouTube and Gemini
//! - Server, logging, cache and model client settings
//! - Optional `.env` file merged into the environment before loading
//!
//! ## Module Structure
//!
//! ```text
//! provider_settings/
//! +-- config/     Settings, credentials, env and env file handling
//! +-- shared/     Error types
//! +-- telemetry   Tracing subscriber setup
//! ```

// Configuration module
pub mod config;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;

pub use crate::config::{ApiKeys, Provider, Settings, SettingsLoader};
pub use crate::shared::error::SettingsError;
