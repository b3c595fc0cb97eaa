//! API credentials: environment variable first, then the OS keyring.

use crate::error::ConfigError;

const SERVICE: &str = "luckyrookie";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    QuoteApiKey,
    MusicClientId,
    MusicClientSecret,
}

impl Credential {
    pub const ALL: [Credential; 3] = [
        Credential::QuoteApiKey,
        Credential::MusicClientId,
        Credential::MusicClientSecret,
    ];

    /// Keyring entry name, also accepted by `auth set`.
    pub fn key(self) -> &'static str {
        match self {
            Credential::QuoteApiKey => "quote_api_key",
            Credential::MusicClientId => "music_client_id",
            Credential::MusicClientSecret => "music_client_secret",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Credential::QuoteApiKey => "LUCKYROOKIE_QUOTE_API_KEY",
            Credential::MusicClientId => "LUCKYROOKIE_MUSIC_CLIENT_ID",
            Credential::MusicClientSecret => "LUCKYROOKIE_MUSIC_CLIENT_SECRET",
        }
    }

    fn remote(self) -> &'static str {
        match self {
            Credential::QuoteApiKey => "Quote API",
            Credential::MusicClientId | Credential::MusicClientSecret => "Music API",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Resolve a credential. A set, non-empty environment variable wins.
///
/// # Errors
/// [`ConfigError::MissingCredential`] when neither source has a value,
/// [`ConfigError::Keyring`] when the keyring itself fails.
pub fn resolve(cred: Credential) -> Result<String, ConfigError> {
    if let Some(value) = from_env(cred) {
        return Ok(value);
    }
    match keyring_get(cred.key())? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential {
            service: cred.remote().into(),
            key: cred.key().into(),
        }),
    }
}

fn from_env(cred: Credential) -> Option<String> {
    std::env::var(cred.env_var())
        .ok()
        .filter(|v| !v.trim().is_empty())
}

pub fn store(cred: Credential, value: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(SERVICE, cred.key())?;
    entry.set_password(value)?;
    tracing::debug!(key = cred.key(), "credential stored");
    Ok(())
}

/// Remove a stored credential. Absent entries are not an error.
pub fn clear(cred: Credential) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(SERVICE, cred.key())?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn keyring_get(key: &str) -> Result<Option<String>, ConfigError> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for cred in Credential::ALL {
            assert_eq!(Credential::from_key(cred.key()), Some(cred));
        }
        assert_eq!(Credential::from_key("spotify"), None);
    }

    #[test]
    fn environment_wins() {
        std::env::set_var(Credential::QuoteApiKey.env_var(), "env-key");
        assert_eq!(resolve(Credential::QuoteApiKey).unwrap(), "env-key");
        std::env::remove_var(Credential::QuoteApiKey.env_var());
    }
}
