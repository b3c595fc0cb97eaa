use clap::Subcommand;
use luckyrookie_core::remote::credentials::{self, Credential};
use luckyrookie_core::remote::MusicClient;
use luckyrookie_core::{Config, Database};

use super::{print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum MusicAction {
    /// Search tracks
    Search {
        /// Song, artist or album
        query: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: MusicAction) -> CmdResult {
    match action {
        MusicAction::Search { query, json } => {
            let config = Config::load_or_default();
            let client_id = credentials::resolve(Credential::MusicClientId)?;
            let client_secret = credentials::resolve(Credential::MusicClientSecret)?;
            let db = Database::open()?;
            let client = MusicClient::new(
                config.endpoints.music_accounts,
                config.endpoints.music_api,
                client_id,
                client_secret,
                &db,
            );

            let tracks = runtime()?.block_on(client.search(&query))?;
            if json {
                return print_json(&tracks);
            }
            if tracks.is_empty() {
                println!("No tracks found.");
            }
            for track in &tracks {
                println!("{} - {} ({})", track.name, track.artist, track.album);
            }
        }
    }
    Ok(())
}
