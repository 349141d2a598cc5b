use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::weather::types::WeatherReport;
use crate::weather::WeatherService;
use crate::zip::{ZipCode, ZipCodeError};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub zip: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, PartialEq)]
pub enum ApiError {
    InvalidZip(ZipCodeError),
    NoData,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::InvalidZip(e) => (StatusCode::BAD_REQUEST, format!("invalid zip code: {e}")),
            ApiError::NoData => (
                StatusCode::BAD_GATEWAY,
                "weather data could not be retrieved".to_string(),
            ),
        };

        let body = ErrorResponse {
            error,
            timestamp: chrono::Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Zip Weather</title></head>
<body>
  <h1>Weather by zip code</h1>
  <form action="/weather" method="get">
    <label for="zip">Zip code:</label>
    <input id="zip" name="zip" type="text" inputmode="numeric" maxlength="5" placeholder="10001">
    <button type="submit">Look up</button>
  </form>
</body>
</html>
"#;

// Route handlers
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Look up current conditions and the one-day forecast for a zip code.
pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>, ApiError> {
    let zip: ZipCode = params.zip.parse().map_err(|e| {
        tracing::debug!(zip = %params.zip, "rejected malformed zip code");
        ApiError::InvalidZip(e)
    })?;

    let report = state.service.fetch(&zip).await;

    if report.data.is_empty() {
        tracing::error!(%zip, "no weather data available from provider");
        return Err(ApiError::NoData);
    }

    Ok(Json(report))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/weather", get(get_weather))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::mock::MockWeatherProvider;
    use crate::weather::{init_cache, WeatherService};

    fn state_with(provider: MockWeatherProvider) -> (AppState, Arc<MockWeatherProvider>) {
        let provider = Arc::new(provider);
        let service = WeatherService::new(provider.clone(), init_cache());
        let state = AppState {
            service: Arc::new(service),
        };
        (state, provider)
    }

    async fn lookup(state: AppState, zip: &str) -> Result<Json<WeatherReport>, ApiError> {
        get_weather(
            State(state),
            Query(WeatherQuery {
                zip: zip.to_string(),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_malformed_zip_is_rejected_before_any_fetch() {
        let (state, provider) = state_with(MockWeatherProvider::new());

        let err = lookup(state.clone(), "abc").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidZip(_)));

        let err = lookup(state, "123").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidZip(_)));

        assert_eq!(provider.current_calls(), 0);
        assert_eq!(provider.forecast_calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_lookup_returns_report() {
        let (state, _provider) = state_with(MockWeatherProvider::new());

        let Json(report) = lookup(state, "10001").await.unwrap();

        assert!(!report.cached);
        assert_eq!(report.data.current.unwrap().temp_f, 70.0);
        assert_eq!(report.data.forecast.unwrap().mintemp_f, 60.0);
    }

    #[tokio::test]
    async fn test_total_provider_outage_maps_to_no_data() {
        let (state, _provider) =
            state_with(MockWeatherProvider::new().failing_current().failing_forecast());

        let err = lookup(state, "10001").await.unwrap_err();
        assert_eq!(err, ApiError::NoData);
    }

    #[tokio::test]
    async fn test_partial_outage_still_answers() {
        let (state, _provider) = state_with(MockWeatherProvider::new().failing_current());

        let Json(report) = lookup(state, "10001").await.unwrap();

        assert!(report.data.current.is_none());
        assert!(report.data.forecast.is_some());
    }
}
