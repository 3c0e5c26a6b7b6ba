//! # Configuration Module
//!
//! This module handles settings loading at process startup.
//! Settings can be loaded from:
//! - Environment variables (plain names such as `PORT` and `OPENAI_API_KEY`)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy), merged into the process environment first
//!
//! The result is a plain [`Settings`] value owned by the caller. Share it
//! behind an `Arc` where several components need it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provider_settings::config::{Provider, Settings};
//!
//! let settings = Settings::load()?;
//! let key = settings.api_keys.require(Provider::Anthropic)?;
//! ```

mod credentials;
mod env;
mod env_file;
mod settings;

pub use credentials::*;
pub use env::*;
pub use env_file::*;
pub use settings::*;
