use clap::Subcommand;
use luckyrookie_core::remote::credentials::{self, Credential};

use super::CmdResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store a credential in the OS keyring
    Set {
        /// quote_api_key, music_client_id or music_client_secret
        key: String,
        value: String,
    },
    /// Remove a credential from the OS keyring
    Clear {
        /// quote_api_key, music_client_id or music_client_secret
        key: String,
    },
}

fn credential(key: &str) -> Result<Credential, String> {
    Credential::from_key(key).ok_or_else(|| {
        let known: Vec<_> = Credential::ALL.iter().map(|c| c.key()).collect();
        format!("unknown credential '{key}' (expected one of: {})", known.join(", "))
    })
}

pub fn run(action: AuthAction) -> CmdResult {
    match action {
        AuthAction::Set { key, value } => {
            credentials::store(credential(&key)?, &value)?;
            println!("{key} stored");
        }
        AuthAction::Clear { key } => {
            credentials::clear(credential(&key)?)?;
            println!("{key} cleared");
        }
    }
    Ok(())
}
