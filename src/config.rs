//! Configuration resolution.
//!
//! Each credential resolves independently with the precedence
//! CLI flag > named profile > environment variable > config file.
//! The config file lives at `<config dir>/ghl/config.toml`; a missing or
//! unreadable file resolves to empty rather than failing.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const ENV_API_KEY: &str = "GHL_API_KEY";
const ENV_LOCATION_ID: &str = "GHL_LOCATION_ID";
const ENV_CLIENT_ID: &str = "GHL_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "GHL_CLIENT_SECRET";
const ENV_REFRESH_TOKEN: &str = "GHL_REFRESH_TOKEN";

/// Parsed config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub location_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub profiles: HashMap<String, Profile>,
}

/// One `[profiles.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub api_key: Option<String>,
    pub location_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl ConfigFile {
    /// Path to the user's config file, if a config directory exists.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ghl").join("config.toml"))
    }

    /// Load the user's config file, treating any failure as empty.
    #[must_use]
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring malformed config file: {e}");
                Self::default()
            }
        }
    }
}

/// Values supplied on the command line; highest precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub location_id: Option<String>,
}

/// Fully resolved credentials, ready to construct a client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub location_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

/// Resolve settings from CLI overrides, the environment, and the config file.
pub fn resolve(overrides: &Overrides, profile: Option<&str>) -> Result<Settings> {
    let file = ConfigFile::load();
    resolve_with(overrides, profile, |name| std::env::var(name).ok(), &file)
}

fn resolve_with(
    overrides: &Overrides,
    profile: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    file: &ConfigFile,
) -> Result<Settings> {
    let profile = match profile {
        Some(name) => Some(
            file.profiles
                .get(name)
                .ok_or_else(|| Error::Config(format!("unknown profile: {name}")))?,
        ),
        None => None,
    };

    let api_key = overrides
        .api_key
        .clone()
        .or_else(|| profile.and_then(|p| p.api_key.clone()))
        .or_else(|| env(ENV_API_KEY))
        .or_else(|| file.api_key.clone());
    let location_id = overrides
        .location_id
        .clone()
        .or_else(|| profile.and_then(|p| p.location_id.clone()))
        .or_else(|| env(ENV_LOCATION_ID))
        .or_else(|| file.location_id.clone());
    let client_id = profile
        .and_then(|p| p.client_id.clone())
        .or_else(|| env(ENV_CLIENT_ID))
        .or_else(|| file.client_id.clone());
    let client_secret = profile
        .and_then(|p| p.client_secret.clone())
        .or_else(|| env(ENV_CLIENT_SECRET))
        .or_else(|| file.client_secret.clone());
    let refresh_token = profile
        .and_then(|p| p.refresh_token.clone())
        .or_else(|| env(ENV_REFRESH_TOKEN))
        .or_else(|| file.refresh_token.clone());

    Ok(Settings {
        api_key,
        location_id,
        client_id,
        client_secret,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_flag_beats_everything() {
        let overrides = Overrides {
            api_key: Some("flag_key".into()),
            location_id: None,
        };
        let file = ConfigFile {
            api_key: Some("file_key".into()),
            ..ConfigFile::default()
        };
        let settings = resolve_with(
            &overrides,
            None,
            |_| Some("env_key".into()),
            &file,
        )
        .unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("flag_key"));
    }

    #[test]
    fn test_profile_beats_env() {
        let mut file = ConfigFile {
            api_key: Some("file_key".into()),
            ..ConfigFile::default()
        };
        file.profiles.insert(
            "staging".into(),
            Profile {
                api_key: Some("profile_key".into()),
                ..Profile::default()
            },
        );
        let settings = resolve_with(
            &Overrides::default(),
            Some("staging"),
            |_| Some("env_key".into()),
            &file,
        )
        .unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("profile_key"));
    }

    #[test]
    fn test_env_beats_file() {
        let file = ConfigFile {
            api_key: Some("file_key".into()),
            ..ConfigFile::default()
        };
        let settings = resolve_with(
            &Overrides::default(),
            None,
            |name| (name == ENV_API_KEY).then(|| "env_key".to_string()),
            &file,
        )
        .unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("env_key"));
    }

    #[test]
    fn test_file_is_last_resort() {
        let file = ConfigFile {
            api_key: Some("file_key".into()),
            refresh_token: Some("file_refresh".into()),
            ..ConfigFile::default()
        };
        let settings = resolve_with(&Overrides::default(), None, no_env, &file).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("file_key"));
        assert_eq!(settings.refresh_token.as_deref(), Some("file_refresh"));
    }

    #[test]
    fn test_nothing_resolves_to_none() {
        let settings =
            resolve_with(&Overrides::default(), None, no_env, &ConfigFile::default()).unwrap();
        assert!(settings.api_key.is_none());
        assert!(settings.location_id.is_none());
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let result = resolve_with(
            &Overrides::default(),
            Some("missing"),
            no_env,
            &ConfigFile::default(),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_profile_falls_back_per_key() {
        let mut file = ConfigFile {
            location_id: Some("file_loc".into()),
            ..ConfigFile::default()
        };
        file.profiles.insert(
            "agency".into(),
            Profile {
                api_key: Some("profile_key".into()),
                ..Profile::default()
            },
        );
        let settings =
            resolve_with(&Overrides::default(), Some("agency"), no_env, &file).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("profile_key"));
        // Key absent from the profile still resolves from the file.
        assert_eq!(settings.location_id.as_deref(), Some("file_loc"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("config.toml"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_load_from_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "api_key = \"k\"\nlocation_id = \"loc\"\n\n[profiles.staging]\napi_key = \"sk\""
        )
        .unwrap();

        let config = ConfigFile::load_from(&path);
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.location_id.as_deref(), Some("loc"));
        assert_eq!(
            config.profiles.get("staging").unwrap().api_key.as_deref(),
            Some("sk")
        );
    }

    #[test]
    fn test_load_from_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();
        let config = ConfigFile::load_from(&path);
        assert!(config.api_key.is_none());
    }
}
