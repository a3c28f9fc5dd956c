use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::city::City;
use crate::error::Result;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current-weather document for `city`, returned unparsed.
    ///
    /// Errors are limited to `UpstreamUnavailable`, `NotFound` and `UpstreamRead`.
    async fn fetch_current(&self, city: &City) -> Result<Bytes>;
}
