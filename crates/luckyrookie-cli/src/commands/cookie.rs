use luckyrookie_core::remote::credentials::{self, Credential};
use luckyrookie_core::remote::QuoteClient;
use luckyrookie_core::Config;

use super::{runtime, CmdResult};

pub fn run() -> CmdResult {
    let config = Config::load_or_default();
    let api_key = credentials::resolve(Credential::QuoteApiKey)?;
    let client = QuoteClient::new(config.endpoints.quote_api, api_key);

    let quote = runtime()?.block_on(client.random())?;
    println!("\u{201c}{}\u{201d}", quote.quote);
    if !quote.author.is_empty() {
        println!("  - {}", quote.author);
    }
    Ok(())
}
