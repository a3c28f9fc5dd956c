use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::city::City;
use crate::error::Result;
use crate::ports::weather_provider::WeatherProvider;

type FetchFn = Box<dyn Fn(&City) -> Result<Bytes> + Send + Sync>;

/// Provider stub that records how often it was asked for data.
pub struct MockWeatherProvider {
    fetch_fn: Mutex<FetchFn>,
    calls: AtomicUsize,
}

impl Default for MockWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self {
            fetch_fn: Mutex::new(Box::new(|_| Ok(Bytes::from_static(b"{}")))),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(body: &'static str) -> Self {
        Self::new().with_fetch(move |_| Ok(Bytes::from_static(body.as_bytes())))
    }

    #[must_use]
    pub fn with_fetch(self, f: impl Fn(&City) -> Result<Bytes> + Send + Sync + 'static) -> Self {
        self.set_fetch(f);
        self
    }

    /// Swap the behaviour on a provider that is already shared.
    pub fn set_fetch(&self, f: impl Fn(&City) -> Result<Bytes> + Send + Sync + 'static) {
        *self.fetch_fn.lock().unwrap() = Box::new(f);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn fetch_current(&self, city: &City) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let f = self.fetch_fn.lock().unwrap();
        f(city)
    }
}
