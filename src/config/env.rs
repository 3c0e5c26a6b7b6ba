//! Environment access.
//!
//! Settings are read through [`ReadEnv`] so the loader can run against the
//! live process environment or an in-memory map.

use std::collections::HashMap;
use std::env::{self, VarError};
use std::path::Path;

use super::env_file::read_env_file;
use crate::shared::error::Result;

/// Source of environment variables.
///
/// Implementations return `None` for unset keys and for keys whose value is
/// empty or whitespace-only.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => non_empty(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                tracing::warn!(key, "Ignoring environment variable with non UTF-8 value");
                None
            }
        }
    }
}

impl SystemEnv {
    /// Keys among `keys` whose value is set but not valid UTF-8.
    ///
    /// [`ReadEnv::var`] treats such values as absent; this lets callers
    /// report them once a subscriber is installed.
    pub fn non_unicode<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        keys.into_iter()
            .filter(|key| env::var_os(key).is_some_and(|value| value.to_str().is_none()))
            .map(str::to_string)
            .collect()
    }
}

/// In-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Merge `KEY=VALUE` declarations from a dotenv file.
    ///
    /// Keys already present are kept. Returns the number of keys added.
    pub fn merge_env_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let mut added = 0;
        for (key, value) in read_env_file(path.as_ref())? {
            if !self.vars.contains_key(&key) {
                self.vars.insert(key, value);
                added += 1;
            }
        }
        Ok(added)
    }
}

impl ReadEnv for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned().and_then(non_empty)
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
