use std::fmt;

use crate::error::{Result, WeatherError};

/// City name exactly as the client supplied it.
///
/// No trimming or case folding: `"Paris"` and `"paris"` are distinct cities,
/// both for the cache and for the upstream query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct City(String);

impl City {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(name) if !name.is_empty() => Ok(Self(name.to_string())),
            _ => Err(WeatherError::InvalidRequest),
        }
    }

    /// Extract `city` from a raw query string. The first occurrence wins.
    pub fn from_query(raw_query: Option<&str>) -> Result<Self> {
        let value = raw_query.and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "city")
                .map(|(_, v)| v.into_owned())
        });
        Self::parse(value.as_deref())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for City {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
