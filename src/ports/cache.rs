use bytes::Bytes;

/// Time-bounded store of upstream payloads keyed by the raw city string.
///
/// Implementations must allow concurrent `get` calls and serialize `set`
/// against every other access.
pub trait WeatherCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Bytes>;
    fn set(&self, key: &str, payload: Bytes);
}
