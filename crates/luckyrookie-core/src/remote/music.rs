//! Track search with an app-level client-credentials token.
//!
//! The token and its expiry (epoch milliseconds) are cached in the
//! key-value store so repeated searches skip the token request.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{decode, endpoint, http_client};
use crate::error::RemoteError;
use crate::storage::{keys, KeyValueStore};

const ACCOUNTS: &str = "Music accounts API";
const SEARCH: &str = "Music API";
const SEARCH_LIMIT: &str = "15";
/// Refresh this long before the server-side expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub album_art: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<RawTrack>,
}

#[derive(Deserialize)]
struct RawTrack {
    name: String,
    #[serde(default)]
    artists: Vec<Named>,
    album: RawAlbum,
}

#[derive(Deserialize)]
struct Named {
    name: String,
}

#[derive(Deserialize)]
struct RawAlbum {
    name: String,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct Image {
    url: String,
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        let artist = raw
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        // Second image is the medium size.
        let album_art = raw
            .album
            .images
            .get(1)
            .or_else(|| raw.album.images.first())
            .map(|img| img.url.clone());
        Track {
            name: raw.name,
            artist,
            album: raw.album.name,
            album_art,
        }
    }
}

pub struct MusicClient<'a> {
    accounts_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    store: &'a dyn KeyValueStore,
    http: Client,
}

impl<'a> MusicClient<'a> {
    pub fn new(
        accounts_url: impl Into<String>,
        api_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        store: &'a dyn KeyValueStore,
    ) -> Self {
        Self {
            accounts_url: accounts_url.into(),
            api_url: api_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            store,
            http: http_client(),
        }
    }

    /// Search tracks. A blank query returns an empty list without any request.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>, RemoteError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let token = self.access_token(Utc::now()).await?;

        let url = endpoint(SEARCH, &self.api_url, "v1/search")?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(&token)
            .query(&[("q", query), ("type", "track"), ("limit", SEARCH_LIMIT)])
            .send()
            .await
            .map_err(RemoteError::request(SEARCH))?;

        let body: SearchResponse = decode(SEARCH, resp).await?;
        Ok(body.tracks.items.into_iter().map(Track::from).collect())
    }

    /// Cached token if still valid at `now`, otherwise a fresh one.
    pub async fn access_token(&self, now: DateTime<Utc>) -> Result<String, RemoteError> {
        if let Some(token) = self.cached_token(now) {
            return Ok(token);
        }

        let url = endpoint(ACCOUNTS, &self.accounts_url, "api/token")?;
        let resp = self
            .http
            .post(url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(RemoteError::request(ACCOUNTS))?;

        let body: TokenResponse = decode(ACCOUNTS, resp).await?;
        let token = body.access_token.ok_or_else(|| RemoteError::Empty {
            service: ACCOUNTS,
            message: "no access_token in response".into(),
        })?;

        match token_expiry(now, body.expires_in) {
            Some(expiry) => self.cache_token(&token, expiry),
            None => tracing::warn!(
                expires_in = body.expires_in,
                "music token expiry out of range; not caching"
            ),
        }
        Ok(token)
    }

    fn cache_token(&self, token: &str, expiry: DateTime<Utc>) {
        if let Err(e) = self.store.set(keys::SPOTIFY_TOKEN, token).and_then(|()| {
            self.store
                .set(keys::SPOTIFY_TOKEN_EXPIRY, &expiry.timestamp_millis().to_string())
        }) {
            tracing::warn!(error = %e, "failed to cache music token");
        }
    }

    fn cached_token(&self, now: DateTime<Utc>) -> Option<String> {
        let token = self.store.get_soft(keys::SPOTIFY_TOKEN)?;
        let expiry: i64 = self.store.get_soft(keys::SPOTIFY_TOKEN_EXPIRY)?.parse().ok()?;
        (now.timestamp_millis() < expiry).then_some(token)
    }
}

/// `now + expires_in - margin`, or `None` when that leaves chrono's range.
fn token_expiry(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    let lifetime = TimeDelta::try_seconds(expires_in.saturating_sub(EXPIRY_MARGIN_SECS))?;
    now.checked_add_signed(lifetime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_expiry_subtracts_margin() {
        let now = Utc::now();
        assert_eq!(token_expiry(now, 3600), Some(now + TimeDelta::seconds(3540)));
        assert_eq!(token_expiry(now, 0), Some(now - TimeDelta::seconds(60)));
    }

    #[test]
    fn token_expiry_out_of_range_is_none() {
        let now = Utc::now();
        assert_eq!(token_expiry(now, i64::MAX), None);
        assert_eq!(token_expiry(now, i64::MIN), None);
    }

    #[test]
    fn track_mapping_prefers_second_image() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "name": "Lucky",
            "artists": [{"name": "Jason Mraz"}, {"name": "Colbie Caillat"}],
            "album": {
                "name": "We Sing. We Dance. We Steal Things.",
                "images": [{"url": "large"}, {"url": "medium"}, {"url": "small"}]
            }
        }))
        .unwrap();
        let track = Track::from(raw);
        assert_eq!(track.artist, "Jason Mraz, Colbie Caillat");
        assert_eq!(track.album_art.as_deref(), Some("medium"));
    }

    #[test]
    fn single_image_and_no_image() {
        let one: RawTrack = serde_json::from_value(serde_json::json!({
            "name": "A", "artists": [], "album": {"name": "B", "images": [{"url": "only"}]}
        }))
        .unwrap();
        assert_eq!(Track::from(one).album_art.as_deref(), Some("only"));

        let none: RawTrack = serde_json::from_value(serde_json::json!({
            "name": "A", "artists": [], "album": {"name": "B"}
        }))
        .unwrap();
        assert_eq!(Track::from(none).album_art, None);
    }
}
