//! HTTP clients for the quote, horoscope, geocoding, sunrise/sunset and
//! music-search APIs.
//!
//! Every client takes its base URL from [`EndpointsConfig`](crate::storage::EndpointsConfig)
//! so tests can point it at a local mock server. One request per call, no
//! retries.

pub mod credentials;
mod geo;
mod horoscope;
mod music;
mod quotes;

pub use geo::{GeoClient, Place, SunTimes};
pub use horoscope::{HoroscopeClient, HoroscopePeriod};
pub use music::{MusicClient, Track};
pub use quotes::{Quote, QuoteClient};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::RemoteError;

pub(crate) fn http_client() -> Client {
    Client::builder()
        .user_agent(concat!("luckyrookie/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Join `path` onto a configured base URL, keeping any path the base has.
pub(crate) fn endpoint(service: &'static str, base: &str, path: &str) -> Result<Url, RemoteError> {
    let raw = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|source| RemoteError::InvalidUrl {
        service,
        url: raw,
        source,
    })
}

/// Turn a non-success status into [`RemoteError::Status`] and decode the
/// body otherwise.
pub(crate) async fn decode<T: DeserializeOwned>(
    service: &'static str,
    resp: Response,
) -> Result<T, RemoteError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(service, status = status.as_u16(), "remote call failed");
        return Err(RemoteError::Status {
            service,
            status: status.as_u16(),
            body,
        });
    }
    resp.json().await.map_err(RemoteError::request(service))
}
