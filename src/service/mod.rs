use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::domain::city::City;
use crate::error::Result;
use crate::ports::cache::WeatherCache;
use crate::ports::weather_provider::WeatherProvider;

/// Read-through cache in front of a [`WeatherProvider`].
///
/// Concurrent misses for the same city each go upstream; the last write wins.
#[derive(Clone)]
pub struct WeatherService {
    cache: Arc<dyn WeatherCache>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(cache: Arc<dyn WeatherCache>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { cache, provider }
    }

    pub async fn weather_for(&self, city: &City) -> Result<Bytes> {
        if let Some(cached) = self.cache.get(city.as_str()) {
            debug!(%city, "Cache hit for weather");
            return Ok(cached);
        }

        debug!(%city, "Cache miss for weather");
        let payload = self
            .provider
            .fetch_current(city)
            .await
            .inspect_err(|e| {
                if e.is_client_error() {
                    debug!(%city, error = %e, "Weather provider rejected city");
                } else {
                    warn!(%city, error = %e, "Weather fetch failed");
                }
            })?;

        self.cache.set(city.as_str(), payload.clone());
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::cache::memory_cache::MemoryCache;
    use crate::error::WeatherError;
    use crate::test_helpers::MockWeatherProvider;

    fn service_with(
        provider: &Arc<MockWeatherProvider>,
        ttl: Duration,
    ) -> (WeatherService, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new(ttl));
        let service = WeatherService::new(
            Arc::clone(&cache) as Arc<dyn WeatherCache>,
            Arc::clone(provider) as Arc<dyn WeatherProvider>,
        );
        (service, cache)
    }

    fn city(name: &str) -> City {
        City::parse(Some(name)).unwrap()
    }

    #[tokio::test]
    async fn miss_fetches_and_stores() {
        let provider = Arc::new(MockWeatherProvider::returning(r#"{"temp":20}"#));
        let (service, cache) = service_with(&provider, Duration::from_secs(300));

        let body = service.weather_for(&city("Berlin")).await.unwrap();

        assert_eq!(body, Bytes::from_static(br#"{"temp":20}"#));
        assert_eq!(provider.calls(), 1);
        assert_eq!(
            cache.get("Berlin"),
            Some(Bytes::from_static(br#"{"temp":20}"#))
        );
    }

    #[tokio::test]
    async fn hit_skips_provider() {
        let provider = Arc::new(MockWeatherProvider::returning(r#"{"temp":20}"#));
        let (service, _cache) = service_with(&provider, Duration::from_secs(300));

        service.weather_for(&city("Berlin")).await.unwrap();
        let second = service.weather_for(&city("Berlin")).await.unwrap();

        assert_eq!(second, Bytes::from_static(br#"{"temp":20}"#));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn different_case_is_a_separate_fetch() {
        let provider = Arc::new(MockWeatherProvider::returning("{}"));
        let (service, cache) = service_with(&provider, Duration::from_secs(300));

        service.weather_for(&city("Paris")).await.unwrap();
        service.weather_for(&city("paris")).await.unwrap();

        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn not_found_is_not_cached() {
        let provider = Arc::new(
            MockWeatherProvider::new()
                .with_fetch(|_| Err(WeatherError::NotFound { status: 404 })),
        );
        let (service, cache) = service_with(&provider, Duration::from_secs(300));

        let err = service.weather_for(&city("Atlantis")).await.unwrap_err();

        assert!(matches!(err, WeatherError::NotFound { status: 404 }));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn failure_after_expiry_propagates() {
        let provider = Arc::new(MockWeatherProvider::returning(r#"{"temp":1}"#));
        let (service, _cache) = service_with(&provider, Duration::from_millis(0));

        service.weather_for(&city("Kyiv")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        provider.set_fetch(|_| Err(WeatherError::NotFound { status: 500 }));

        let err = service.weather_for(&city("Kyiv")).await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound { status: 500 }));
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let provider = Arc::new(MockWeatherProvider::returning(r#"{"temp":1}"#));
        let (service, _cache) = service_with(&provider, Duration::from_millis(0));

        service.weather_for(&city("Kyiv")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        provider.set_fetch(|_| Ok(Bytes::from_static(br#"{"temp":2}"#)));

        let body = service.weather_for(&city("Kyiv")).await.unwrap();
        assert_eq!(body, Bytes::from_static(br#"{"temp":2}"#));
        assert_eq!(provider.calls(), 2);
    }
}
