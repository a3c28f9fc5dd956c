use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::types::UpstreamConfig;
use crate::domain::city::City;
use crate::error::{Result, WeatherError};
use crate::ports::weather_provider::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "data/2.5/weather";

/// OpenWeatherMap current-weather client. Responses are passed through unparsed.
pub struct OpenWeatherClient {
    http: Client,
    config: UpstreamConfig,
}

impl OpenWeatherClient {
    pub fn new(config: UpstreamConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    fn current_weather_url(&self, city: &City) -> Result<Url> {
        build_current_weather_url(
            &self.config.base_url,
            city.as_str(),
            &self.config.api_key,
            &self.config.units,
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(&self, city: &City) -> Result<Bytes> {
        let url = self
            .current_weather_url(city)
            .inspect_err(|e| warn!(error = %e, "Invalid upstream base URL"))?;

        debug!(%city, "Fetching current weather");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(WeatherError::UpstreamUnavailable)?;

        // Only 200 counts; any other status, 2xx included, is reported as an unknown city
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            debug!(%city, status = status.as_u16(), "Weather provider rejected request");
            return Err(WeatherError::NotFound {
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(WeatherError::UpstreamRead)
    }
}

/// Builds `{base}/data/2.5/weather?q=..&appid=..&units=..` with every value percent-encoded.
///
/// Any path already on `base_url` is kept as a prefix.
pub fn build_current_weather_url(
    base_url: &str,
    city: &str,
    api_key: &str,
    units: &str,
) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    let mut url = base.join(CURRENT_WEATHER_PATH)?;
    url.query_pairs_mut()
        .append_pair("q", city)
        .append_pair("appid", api_key)
        .append_pair("units", units);
    Ok(url)
}
