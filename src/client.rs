use std::time::Duration;

use log::debug;
use reqwest::{Url, blocking::Client};
use serde::de::DeserializeOwned;

use crate::{
    LapchartError,
    laps::{LapRecord, RaceInfo},
    query::LapQuery,
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_S: u64 = 30;

/// Where lap data comes from. The viewer and the loader only talk to this
/// trait, so tests can swap in a fake service.
pub trait LapSource: Send + Sync + 'static {
    /// Lap times for one driver in one race.
    fn laps(&self, query: &LapQuery) -> Result<Vec<LapRecord>, LapchartError>;

    /// Event details for a race.
    fn race_info(&self, year: &str, race: &str) -> Result<RaceInfo, LapchartError>;

    /// Human readable location of the service, used in error messages.
    fn origin(&self) -> &str;
}

/// `LapSource` backed by the lap-timing HTTP service.
pub struct HttpLapSource {
    client: Client,
    base_url: Url,
    origin: String,
}

impl HttpLapSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LapchartError> {
        let origin = base_url.trim().trim_end_matches('/').to_string();
        let mut parsed = Url::parse(&origin).map_err(|_| LapchartError::InvalidServiceUrl {
            url: base_url.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(LapchartError::InvalidServiceUrl {
                url: base_url.to_string(),
            });
        }
        // endpoints are joined relative to the base path
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LapchartError::HttpClientError { source: e })?;

        Ok(Self {
            client,
            base_url: parsed,
            origin,
        })
    }

    pub fn with_defaults() -> Result<Self, LapchartError> {
        Self::new(
            DEFAULT_BASE_URL,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_S),
        )
    }

    pub(crate) fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, LapchartError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|_| LapchartError::InvalidServiceUrl {
                url: format!("{}{}", self.base_url, path),
            })?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LapchartError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LapchartError::Request { source: e })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LapchartError::HttpStatus { status });
        }

        response
            .json::<T>()
            .map_err(|e| LapchartError::InvalidResponse { source: e })
    }
}

impl LapSource for HttpLapSource {
    fn laps(&self, query: &LapQuery) -> Result<Vec<LapRecord>, LapchartError> {
        let url = self.endpoint(
            "laps",
            &[
                ("year", query.year.as_str()),
                ("race", query.race.as_str()),
                ("driver", query.driver.as_str()),
            ],
        )?;
        // a `null` body counts as no laps
        let laps: Option<Vec<LapRecord>> = self.get_json(url)?;
        Ok(laps.unwrap_or_default())
    }

    fn race_info(&self, year: &str, race: &str) -> Result<RaceInfo, LapchartError> {
        let url = self.endpoint("race", &[("year", year), ("race", race)])?;
        self.get_json(url)
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}
