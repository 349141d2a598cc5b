use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::types::{CurrentResponse, ForecastResponse};
use super::WeatherApi;
use crate::config::Config;
use crate::zip::ZipCode;

/// Per-request ceiling; a hung provider call becomes a soft failure instead
/// of blocking the request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("zip-weather-server/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum WeatherApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: HTTP {status}: {body}")]
    ApiError {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Client for the WeatherAPI.com v1 endpoints. The credential travels as a
/// `key` query parameter on every request.
pub struct WeatherApiClient {
    client: Client,
    config: Config,
}

impl WeatherApiClient {
    pub fn new(config: Config) -> Result<Self, WeatherApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, config })
    }

    // No retries here: a failed call is reported to the caller as-is and the
    // orchestrator degrades that half of the snapshot.
    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, WeatherApiError> {
        let url = format!("{}{}", self.config.weather_api_base_url, path);

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherApiError::ApiError { status, body });
        }

        let json: Value = response.json().await?;
        Ok(json)
    }
}

#[async_trait]
impl WeatherApi for WeatherApiClient {
    async fn current(&self, zip: &ZipCode) -> Result<CurrentResponse, WeatherApiError> {
        let response = self
            .get_json(
                &self.config.weather_current_path,
                &[("q", zip.as_str()), ("key", &self.config.weather_api_key)],
            )
            .await?;

        let current: CurrentResponse = serde_json::from_value(response)?;
        Ok(current)
    }

    async fn forecast(
        &self,
        zip: &ZipCode,
        days: u32,
    ) -> Result<ForecastResponse, WeatherApiError> {
        let days = days.to_string();
        let response = self
            .get_json(
                &self.config.weather_forecast_path,
                &[
                    ("q", zip.as_str()),
                    ("days", days.as_str()),
                    ("key", &self.config.weather_api_key),
                ],
            )
            .await?;

        let forecast: ForecastResponse = serde_json::from_value(response)?;
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> Config {
        Config {
            weather_api_key: "test-key".to_string(),
            weather_api_base_url: base_url,
            weather_current_path: "/current.json".to_string(),
            weather_forecast_path: "/forecast.json".to_string(),
        }
    }

    fn zip() -> ZipCode {
        "10001".parse().unwrap()
    }

    #[tokio::test]
    async fn test_current_sends_zip_and_credential() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .and(query_param("q", "10001"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "location": { "name": "New York" },
                "current": { "temp_c": 21.1, "temp_f": 70.0, "humidity": 65 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(test_config(server.uri())).unwrap();
        let response = client.current(&zip()).await.unwrap();

        assert_eq!(response.current.temp_f, 70.0);
        assert_eq!(response.current.temp_c, 21.1);
        assert_eq!(response.current.humidity, Some(65));
    }

    #[tokio::test]
    async fn test_forecast_requests_one_day_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .and(query_param("q", "10001"))
            .and(query_param("days", "1"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "forecast": {
                    "forecastday": [{
                        "date": "2024-11-12",
                        "day": {
                            "maxtemp_c": 26.7,
                            "maxtemp_f": 80.0,
                            "mintemp_c": 15.6,
                            "mintemp_f": 60.0
                        }
                    }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(test_config(server.uri())).unwrap();
        let response = client.forecast(&zip(), 1).await.unwrap();

        assert_eq!(response.forecast.forecastday.len(), 1);
        assert_eq!(response.forecast.forecastday[0].day.maxtemp_f, 80.0);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({ "error": { "code": 2008 } })),
            )
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(test_config(server.uri())).unwrap();
        let err = client.current(&zip()).await.unwrap_err();

        match err {
            WeatherApiError::ApiError { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::FORBIDDEN)
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "current": {} })),
            )
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(test_config(server.uri())).unwrap();
        let err = client.current(&zip()).await.unwrap_err();

        assert!(matches!(err, WeatherApiError::JsonParsing(_)));
    }
}
