mod config;
pub mod database;
pub mod keys;

pub use config::{BreathingConfig, Config, EndpointsConfig, ProfileConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::StoreError;

/// String key-value persistence.
///
/// Every persisted piece of app state (breathing tallies, diary entries,
/// clover balance, cached tokens) goes through this contract. Readers treat
/// `Err` from [`get`](KeyValueStore::get) the same as `Ok(None)`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read a key, logging and swallowing any store error.
    fn get_soft(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "kv read failed, treating as absent");
                None
            }
        }
    }
}

/// Returns the data directory.
///
/// `LUCKYROOKIE_DATA_DIR` wins when set. Otherwise `~/.config/luckyrookie/`,
/// or `~/.config/luckyrookie-dev/` with `LUCKYROOKIE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("LUCKYROOKIE_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("LUCKYROOKIE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("luckyrookie-dev")
            } else {
                base_dir.join("luckyrookie")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
