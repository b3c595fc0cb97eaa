//! Fortune-cookie quote client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{decode, endpoint, http_client};
use crate::error::RemoteError;

const SERVICE: &str = "Quote API";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

pub struct QuoteClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl QuoteClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http: http_client(),
        }
    }

    /// Fetch one random quote.
    ///
    /// # Errors
    /// Non-success status, an empty list, or a blank first quote.
    pub async fn random(&self) -> Result<Quote, RemoteError> {
        let url = endpoint(SERVICE, &self.base_url, "v2/randomquotes")?;
        let resp = self
            .http
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(RemoteError::request(SERVICE))?;

        let quotes: Vec<Quote> = decode(SERVICE, resp).await?;
        match quotes.into_iter().next() {
            Some(q) if !q.quote.trim().is_empty() => Ok(q),
            _ => Err(RemoteError::Empty {
                service: SERVICE,
                message: "No quote in response".into(),
            }),
        }
    }
}
