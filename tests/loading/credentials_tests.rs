//! Credential Loading Tests
//!
//! Credentials read from the live process environment.

use pretty_assertions::assert_eq;
use provider_settings::config::{ApiKeys, EnvFile, EnvFileStatus, Provider};

use crate::common::{isolated_env, loader};

#[test]
fn test_set_key_is_exposed_and_others_are_none() {
    temp_env::with_vars(isolated_env(&[("OPENAI_API_KEY", "sk-test123")]), || {
        let settings = loader(EnvFile::Disabled).load().unwrap();

        assert_eq!(settings.api_keys.openai_api_key.as_deref(), Some("sk-test123"));
        assert_eq!(settings.api_keys.google_api_key, None);
        assert_eq!(settings.env_file, EnvFileStatus::Disabled);
    });
}

#[test]
fn test_every_key_round_trips_from_process_env() {
    let overrides = [
        ("OPENAI_API_KEY", "sk-openai"),
        ("ANTHROPIC_API_KEY", "sk-ant-api03-anthropic"),
        ("GOOGLE_API_KEY", "google-key"),
        ("GROK_API_KEY", "xai-grok"),
        ("YOUTUBE_API_KEY", "yt-key"),
        ("GEMINI_API_KEY", "gemini-key"),
        ("SERVER_GEMINI_API_KEY", "server-gemini-key"),
    ];
    temp_env::with_vars(isolated_env(&overrides), || {
        let keys = loader(EnvFile::Disabled).load().unwrap().api_keys;

        for (var, value) in overrides {
            let provider: Provider = var.parse().unwrap();
            assert_eq!(keys.get(provider), Some(value));
        }
        assert_eq!(keys.missing().count(), 0);
    });
}

#[test]
fn test_no_keys_is_not_an_error() {
    temp_env::with_vars(isolated_env(&[]), || {
        let settings = loader(EnvFile::Disabled).load().unwrap();
        assert_eq!(settings.api_keys, ApiKeys::default());
    });
}

#[test]
fn test_empty_value_counts_as_unset() {
    temp_env::with_vars(isolated_env(&[("GROK_API_KEY", "")]), || {
        let settings = loader(EnvFile::Disabled).load().unwrap();
        assert_eq!(settings.api_keys.grok_api_key, None);
        assert!(settings.api_keys.require(Provider::Grok).is_err());
    });
}

#[test]
fn test_reloading_with_unchanged_env_is_identical() {
    temp_env::with_vars(
        isolated_env(&[("YOUTUBE_API_KEY", "yt-key"), ("PORT", "4100")]),
        || {
            let first = loader(EnvFile::Disabled).load().unwrap();
            let second = loader(EnvFile::Disabled).load().unwrap();
            assert_eq!(first, second);
        },
    );
}

#[cfg(unix)]
#[test]
fn test_non_utf8_key_is_absent_and_reported() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let vars: Vec<(&str, Option<OsString>)> = isolated_env(&[])
        .into_iter()
        .map(|(key, _)| {
            let value = (key == "GROK_API_KEY").then(|| OsString::from_vec(vec![0x78, 0x80, 0x61]));
            (key, value)
        })
        .collect();

    temp_env::with_vars(vars, || {
        let settings = loader(EnvFile::Disabled).load().unwrap();

        assert_eq!(settings.api_keys.grok_api_key, None);
        assert_eq!(settings.ignored_vars, vec!["GROK_API_KEY".to_string()]);
    });
}
