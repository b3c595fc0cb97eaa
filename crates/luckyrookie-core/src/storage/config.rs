//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Profile (birth date, home city)
//! - Default breathing pattern
//! - Base URLs for every remote API
//!
//! Configuration is stored at `~/.config/luckyrookie/config.toml`.
//! API secrets never live here; see [`crate::remote::credentials`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Profile used by the lucky-time and horoscope commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Birth date as `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default = "default_city")]
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
}

/// Base URLs of the remote services. Overridable for self-hosted mirrors
/// and for tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_quote_api")]
    pub quote_api: String,
    #[serde(default = "default_horoscope_api")]
    pub horoscope_api: String,
    #[serde(default = "default_geocoding_api")]
    pub geocoding_api: String,
    #[serde(default = "default_sun_api")]
    pub sun_api: String,
    #[serde(default = "default_music_accounts")]
    pub music_accounts: String,
    #[serde(default = "default_music_api")]
    pub music_api: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

fn default_city() -> String {
    "Seoul".into()
}
fn default_pattern() -> String {
    "4-7-8".into()
}
fn default_quote_api() -> String {
    "https://api.api-ninjas.com".into()
}
fn default_horoscope_api() -> String {
    "https://horoscope-app-api.vercel.app/api/v1".into()
}
fn default_geocoding_api() -> String {
    "https://geocoding-api.open-meteo.com".into()
}
fn default_sun_api() -> String {
    "https://api.sunrise-sunset.org".into()
}
fn default_music_accounts() -> String {
    "https://accounts.spotify.com".into()
}
fn default_music_api() -> String {
    "https://api.spotify.com".into()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            birth_date: None,
            city: default_city(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            default_pattern: default_pattern(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            quote_api: default_quote_api(),
            horoscope_api: default_horoscope_api(),
            geocoding_api: default_geocoding_api(),
            sun_api: default_sun_api(),
            music_accounts: default_music_accounts(),
            music_api: default_music_api(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            if is_leaf {
                let existing = obj.get(part).ok_or_else(unknown)?;
                let new_value = match existing {
                    serde_json::Value::Bool(_) => {
                        let b = value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?;
                        serde_json::Value::Bool(b)
                    }
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: "not a leaf value".into(),
                        });
                    }
                    _ if value.is_empty() => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };
                obj.insert(part.to_string(), new_value);
                return Ok(());
            }
            current = obj.get_mut(part).ok_or_else(unknown)?;
        }
        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// Unset optional values read as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. An empty value clears an
    /// optional string.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value has the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.profile.city, "Seoul");
        assert_eq!(parsed.breathing.default_pattern, "4-7-8");
        assert!(parsed.profile.birth_date.is_none());
    }

    #[test]
    fn empty_file_uses_section_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.endpoints.sun_api, "https://api.sunrise-sunset.org");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("profile.city").as_deref(), Some("Seoul"));
        assert_eq!(cfg.get("breathing.default_pattern").as_deref(), Some("4-7-8"));
        assert!(cfg.get("profile.birth_date").is_none());
        assert!(cfg.get("profile.missing_key").is_none());
    }

    #[test]
    fn set_fills_optional_birth_date() {
        let mut cfg = Config::default();
        cfg.set("profile.birth_date", "2002-12-07").unwrap();
        assert_eq!(cfg.profile.birth_date.as_deref(), Some("2002-12-07"));

        cfg.set("profile.birth_date", "").unwrap();
        assert!(cfg.profile.birth_date.is_none());
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("profile.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("", "value").is_err());
    }

    #[test]
    fn set_rejects_section_as_leaf() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("endpoints", "x"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.profile.city, "Seoul");
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("profile.city", "Busan").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.profile.city, "Busan");
    }

    #[test]
    fn load_from_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "profile = 3").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
