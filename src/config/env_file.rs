//! Optional local `.env` file.
//!
//! The file is merged into the process environment once, before any
//! setting is read. Variables already present in the environment are never
//! overridden by the file.

use std::env;
use std::path::{Path, PathBuf};

use crate::shared::error::{Result, SettingsError};

/// Which env file to merge at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvFile {
    /// `.env` in the working directory or its nearest ancestor.
    #[default]
    Discover,
    /// An exact file path.
    Path(PathBuf),
    /// Skip env file handling entirely.
    Disabled,
}

/// Outcome of merging the env file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvFileStatus {
    Loaded(PathBuf),
    #[default]
    NotFound,
    Disabled,
}

impl EnvFileStatus {
    pub fn loaded_path(&self) -> Option<&PathBuf> {
        match self {
            EnvFileStatus::Loaded(path) => Some(path),
            _ => None,
        }
    }
}

impl EnvFile {
    /// Merge the file's declarations into the process environment.
    ///
    /// The whole file is parsed before any variable is set, so a malformed
    /// file leaves the environment untouched. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EnvFile`] when the file exists but cannot be
    /// read or contains a malformed line.
    pub fn merge_into_process(&self) -> Result<EnvFileStatus> {
        let path = match self {
            EnvFile::Disabled => return Ok(EnvFileStatus::Disabled),
            EnvFile::Discover => match discover(DEFAULT_FILE_NAME)? {
                Some(path) => path,
                None => {
                    tracing::debug!("No env file found");
                    return Ok(EnvFileStatus::NotFound);
                }
            },
            EnvFile::Path(path) => path.clone(),
        };

        let declarations = match read_env_file(&path) {
            Ok(declarations) => declarations,
            Err(SettingsError::EnvFile { source, .. }) if source.not_found() => {
                tracing::debug!(path = %path.display(), "No env file found");
                return Ok(EnvFileStatus::NotFound);
            }
            Err(e) => return Err(e),
        };

        let mut added = 0;
        for (key, value) in declarations {
            if env::var_os(&key).is_none() {
                env::set_var(&key, value);
                added += 1;
            }
        }

        tracing::debug!(path = %path.display(), added, "Merged env file into environment");
        Ok(EnvFileStatus::Loaded(path))
    }
}

/// File name searched for by [`EnvFile::Discover`].
pub const DEFAULT_FILE_NAME: &str = ".env";

/// Parse every declaration in a dotenv file.
///
/// Nothing is returned unless the whole file parses.
pub(crate) fn read_env_file(path: &Path) -> Result<Vec<(String, String)>> {
    let env_file_error = |source| SettingsError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    dotenvy::from_path_iter(path)
        .map_err(env_file_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(env_file_error)
}

/// Nearest `name` in the working directory or one of its ancestors.
fn discover(name: &str) -> Result<Option<PathBuf>> {
    let cwd = env::current_dir().map_err(|e| SettingsError::EnvFile {
        path: PathBuf::from(name),
        source: dotenvy::Error::Io(e),
    })?;

    Ok(cwd
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file()))
}
