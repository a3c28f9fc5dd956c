use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("City parameter is required")]
    InvalidRequest,

    #[error("Failed to reach weather provider: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    #[error("Weather provider returned HTTP {status}")]
    NotFound { status: u16 },

    #[error("Failed to read weather provider response: {0}")]
    UpstreamRead(#[source] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl WeatherError {
    /// True for failures caused by the caller's input rather than by us or the provider.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest | Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
