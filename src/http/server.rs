//! HTTP surface
//!
//! - `GET /`: static landing page
//! - `GET /api/weather?city=<name>`: cached current weather, upstream JSON verbatim

use std::path::Path;

use axum::{
    Router,
    extract::{RawQuery, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::domain::city::City;
use crate::error::WeatherError;
use crate::service::WeatherService;

/// Build the application router. `index_file` is served at `/`.
pub fn create_router(service: WeatherService, index_file: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/weather", get(handle_weather))
        .route_service("/", ServeFile::new(index_file))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn handle_weather(
    State(service): State<WeatherService>,
    RawQuery(query): RawQuery,
) -> Result<Response, WeatherError> {
    let city = City::from_query(query.as_deref())?;
    let payload = service.weather_for(&city).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response())
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WeatherError::InvalidRequest => (StatusCode::BAD_REQUEST, "City parameter is required"),
            WeatherError::UpstreamUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch weather data",
            ),
            WeatherError::NotFound { .. } => (StatusCode::NOT_FOUND, "City not found"),
            WeatherError::UpstreamRead(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read response")
            }
            WeatherError::Config(_)
            | WeatherError::Io(_)
            | WeatherError::Yaml(_)
            | WeatherError::Url(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}
