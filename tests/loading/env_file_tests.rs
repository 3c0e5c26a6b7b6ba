//! Env File Tests
//!
//! The optional `.env` file is merged into the process environment before
//! settings are read.

use pretty_assertions::assert_eq;
use provider_settings::config::{EnvFile, EnvFileStatus, Provider};
use provider_settings::SettingsError;

use crate::common::{env_file, isolated_env, loader, CurrentDirGuard};

#[test]
fn test_file_values_fill_unset_keys() {
    let file = env_file(&[
        "# local credentials",
        "GEMINI_API_KEY=from-file",
        "SERVER_GEMINI_API_KEY='quoted-server-key'",
        "PORT=4500",
    ]);

    temp_env::with_vars(isolated_env(&[]), || {
        let settings = loader(EnvFile::Path(file.path().to_path_buf()))
            .load()
            .unwrap();

        assert_eq!(settings.api_keys.get(Provider::Gemini), Some("from-file"));
        assert_eq!(
            settings.api_keys.get(Provider::ServerGemini),
            Some("quoted-server-key")
        );
        assert_eq!(settings.server.port, 4500);
        assert_eq!(settings.env_file.loaded_path(), Some(&file.path().to_path_buf()));
        assert_eq!(std::env::var("GEMINI_API_KEY").as_deref(), Ok("from-file"));
    });
}

#[test]
fn test_process_env_wins_over_file() {
    let file = env_file(&["ANTHROPIC_API_KEY=from-file"]);

    temp_env::with_vars(isolated_env(&[("ANTHROPIC_API_KEY", "from-env")]), || {
        let settings = loader(EnvFile::Path(file.path().to_path_buf()))
            .load()
            .unwrap();
        assert_eq!(settings.api_keys.get(Provider::Anthropic), Some("from-env"));
    });
}

#[test]
fn test_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");

    temp_env::with_vars(isolated_env(&[("OPENAI_API_KEY", "sk-test123")]), || {
        let settings = loader(EnvFile::Path(path.clone())).load().unwrap();

        assert_eq!(settings.env_file, EnvFileStatus::NotFound);
        assert_eq!(settings.api_keys.get(Provider::OpenAi), Some("sk-test123"));
        assert_eq!(settings.api_keys.get(Provider::Google), None);
    });
}

#[test]
fn test_malformed_file_fails_loading() {
    let file = env_file(&["OPENAI_API_KEY sk-missing-equals"]);

    temp_env::with_vars(isolated_env(&[]), || {
        let err = loader(EnvFile::Path(file.path().to_path_buf()))
            .load()
            .unwrap_err();
        assert!(matches!(err, SettingsError::EnvFile { .. }));
    });
}

#[test]
fn test_second_load_sees_same_values() {
    let file = env_file(&["YOUTUBE_API_KEY=yt-from-file"]);

    temp_env::with_vars(isolated_env(&[]), || {
        let loader = loader(EnvFile::Path(file.path().to_path_buf()));
        let first = loader.load().unwrap();
        let second = loader.load().unwrap();
        assert_eq!(first, second);
    });
}

#[test]
fn test_malformed_file_leaves_environment_untouched() {
    let file = env_file(&["OPENAI_API_KEY=set-before-bad-line", "NOT A DECLARATION"]);

    temp_env::with_vars(isolated_env(&[]), || {
        let result = loader(EnvFile::Path(file.path().to_path_buf())).load();

        assert!(result.is_err());
        assert!(std::env::var_os("OPENAI_API_KEY").is_none());
    });
}

#[test]
fn test_discover_finds_env_file_in_ancestor() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let nested = root.join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(root.join(".env"), "GOOGLE_API_KEY=discovered\n").unwrap();

    temp_env::with_vars(isolated_env(&[]), || {
        let _cwd = CurrentDirGuard::enter(&nested);
        let settings = loader(EnvFile::Discover).load().unwrap();

        assert_eq!(settings.env_file, EnvFileStatus::Loaded(root.join(".env")));
        assert_eq!(settings.api_keys.get(Provider::Google), Some("discovered"));
    });
}

#[test]
fn test_discover_error_names_the_discovered_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let nested = root.join("nested");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(root.join(".env"), "NOT A DECLARATION\n").unwrap();

    temp_env::with_vars(isolated_env(&[]), || {
        let _cwd = CurrentDirGuard::enter(&nested);
        let err = loader(EnvFile::Discover).load().unwrap_err();

        match err {
            SettingsError::EnvFile { path, .. } => assert_eq!(path, root.join(".env")),
            other => panic!("unexpected error: {other:?}"),
        }
    });
}
