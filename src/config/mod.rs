pub mod types;

use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{Result, WeatherError};
use types::Config;

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const PORT_VAR: &str = "PORT";

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        WeatherError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    // An empty file deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

/// Apply `OPENWEATHER_API_KEY` and `PORT` on top of `config`, then check that a
/// credential is present. `lookup` is `std::env::var(..).ok()` outside tests.
pub fn apply_env(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    if let Some(key) = lookup(API_KEY_VAR) {
        config.upstream.api_key = key;
    }

    if let Some(port) = lookup(PORT_VAR).filter(|p| !p.is_empty()) {
        config.server.port = port.parse().map_err(|_| {
            WeatherError::Config(format!("{PORT_VAR} must be a port number, got '{port}'"))
        })?;
    }

    if config.upstream.api_key.is_empty() {
        return Err(WeatherError::Config(format!(
            "{API_KEY_VAR} environment variable not set"
        )));
    }

    validate_ttl(config.cache.ttl_secs)?;

    Ok(config)
}

/// Every cache write computes `now + ttl`, so the TTL must fit on the clock.
fn validate_ttl(ttl_secs: u64) -> Result<()> {
    if Instant::now()
        .checked_add(Duration::from_secs(ttl_secs))
        .is_none()
    {
        return Err(WeatherError::Config(format!(
            "cache.ttl_secs {ttl_secs} is too large"
        )));
    }
    Ok(())
}
