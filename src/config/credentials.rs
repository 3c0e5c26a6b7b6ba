//! Third-party API credentials.

use std::fmt;
use std::str::FromStr;

use super::env::ReadEnv;
use crate::shared::error::{Result, SettingsError};

/// Marker printed in place of a credential value.
pub const REDACTED: &str = "********";

/// A recognised third-party credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
    Grok,
    YouTube,
    Gemini,
    /// Gemini key reserved for server-side calls
    ServerGemini,
}

impl Provider {
    /// Every provider, in declaration order.
    pub const ALL: [Provider; 7] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::Google,
        Provider::Grok,
        Provider::YouTube,
        Provider::Gemini,
        Provider::ServerGemini,
    ];

    /// Environment variable holding this provider's key.
    pub const fn env_var(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Google => "GOOGLE_API_KEY",
            Provider::Grok => "GROK_API_KEY",
            Provider::YouTube => "YOUTUBE_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::ServerGemini => "SERVER_GEMINI_API_KEY",
        }
    }

    /// Short lowercase name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::Grok => "grok",
            Provider::YouTube => "youtube",
            Provider::Gemini => "gemini",
            Provider::ServerGemini => "server-gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    /// Accepts the short name (`openai`) or the env var (`OPENAI_API_KEY`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s) || p.env_var().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// API keys read from the environment at startup.
///
/// Absent keys are `None`. Nothing here checks that a key is present;
/// consumers that need one call [`ApiKeys::require`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub grok_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub server_gemini_api_key: Option<String>,
}

impl ApiKeys {
    /// Read every provider key from `env`. Never fails.
    pub fn from_env(env: &impl ReadEnv) -> Self {
        let mut keys = Self::default();
        for provider in Provider::ALL {
            *keys.slot_mut(provider) = env.var(provider.env_var());
        }
        keys
    }

    pub fn get(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAi => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
            Provider::Google => self.google_api_key.as_deref(),
            Provider::Grok => self.grok_api_key.as_deref(),
            Provider::YouTube => self.youtube_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
            Provider::ServerGemini => self.server_gemini_api_key.as_deref(),
        }
    }

    /// Get a key that the caller cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingCredential`] when the key is unset.
    pub fn require(&self, provider: Provider) -> Result<&str> {
        self.get(provider)
            .ok_or(SettingsError::MissingCredential(provider))
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.get(provider).is_some()
    }

    /// Providers with a key set.
    pub fn configured(&self) -> impl Iterator<Item = Provider> + '_ {
        Provider::ALL.into_iter().filter(|p| self.is_configured(*p))
    }

    /// Providers without a key.
    pub fn missing(&self) -> impl Iterator<Item = Provider> + '_ {
        Provider::ALL.into_iter().filter(|p| !self.is_configured(*p))
    }

    fn slot_mut(&mut self, provider: Provider) -> &mut Option<String> {
        match provider {
            Provider::OpenAi => &mut self.openai_api_key,
            Provider::Anthropic => &mut self.anthropic_api_key,
            Provider::Google => &mut self.google_api_key,
            Provider::Grok => &mut self.grok_api_key,
            Provider::YouTube => &mut self.youtube_api_key,
            Provider::Gemini => &mut self.gemini_api_key,
            Provider::ServerGemini => &mut self.server_gemini_api_key,
        }
    }
}

// Key values must never reach a log line.
impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ApiKeys");
        for provider in Provider::ALL {
            let shown = self.get(provider).map(|_| REDACTED);
            s.field(provider.env_var(), &shown);
        }
        s.finish()
    }
}
