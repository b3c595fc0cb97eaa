use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{decode, endpoint, http_client};
use crate::error::RemoteError;
use crate::zodiac::ZodiacSign;

const SERVICE: &str = "Horoscope API";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoroscopePeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl HoroscopePeriod {
    fn path(self) -> &'static str {
        match self {
            HoroscopePeriod::Daily => "get-horoscope/daily",
            HoroscopePeriod::Weekly => "get-horoscope/weekly",
            HoroscopePeriod::Monthly => "get-horoscope/monthly",
        }
    }
}

impl std::str::FromStr for HoroscopePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(HoroscopePeriod::Daily),
            "weekly" => Ok(HoroscopePeriod::Weekly),
            "monthly" => Ok(HoroscopePeriod::Monthly),
            other => Err(format!("unknown horoscope period '{other}'")),
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    data: Option<Reading>,
}

#[derive(Deserialize)]
struct Reading {
    horoscope_data: Option<String>,
}

pub struct HoroscopeClient {
    base_url: String,
    http: Client,
}

impl HoroscopeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: http_client(),
        }
    }

    /// Reading text for `sign` over `period`.
    pub async fn reading(
        &self,
        sign: ZodiacSign,
        period: HoroscopePeriod,
    ) -> Result<String, RemoteError> {
        let url = endpoint(SERVICE, &self.base_url, period.path())?;
        let mut req = self.http.get(url).query(&[("sign", sign.name())]);
        if period == HoroscopePeriod::Daily {
            req = req.query(&[("day", "TODAY")]);
        }
        let resp = req.send().await.map_err(RemoteError::request(SERVICE))?;

        let envelope: Envelope = decode(SERVICE, resp).await?;
        envelope
            .data
            .and_then(|d| d.horoscope_data)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| RemoteError::Empty {
                service: SERVICE,
                message: format!("no reading for {sign}"),
            })
    }
}
