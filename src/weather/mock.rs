use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::types::{
    ConditionInfo, CurrentConditions, CurrentResponse, DaySummary, ForecastBlock, ForecastDay,
    ForecastResponse,
};
use super::weatherapi::WeatherApiError;
use super::WeatherApi;
use crate::zip::ZipCode;

/// Serves canned WeatherAPI payloads without touching the network. Either
/// endpoint can be told to fail so the degraded merge paths are reachable,
/// and call counters back the no-external-calls-on-cache-hit assertions.
#[derive(Default)]
pub struct MockWeatherProvider {
    fail_current: AtomicBool,
    fail_forecast: AtomicBool,
    empty_forecast: AtomicBool,
    current_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_current(self) -> Self {
        self.fail_current.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_forecast(self) -> Self {
        self.fail_forecast.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_empty_forecast(self) -> Self {
        self.empty_forecast.store(true, Ordering::SeqCst);
        self
    }

    pub fn current_calls(&self) -> usize {
        self.current_calls.load(Ordering::SeqCst)
    }

    pub fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    fn canned_current() -> CurrentResponse {
        CurrentResponse {
            current: CurrentConditions {
                last_updated: Some("2024-11-12 14:30".to_string()),
                temp_c: 21.1,
                temp_f: 70.0,
                condition: Some(ConditionInfo {
                    text: "Partly cloudy".to_string(),
                    icon: Some("//cdn.weatherapi.com/weather/64x64/day/116.png".to_string()),
                    code: Some(1003),
                }),
                wind_mph: Some(6.9),
                wind_kph: Some(11.2),
                humidity: Some(65),
                cloud: Some(25),
                feelslike_c: Some(21.0),
                feelslike_f: Some(69.8),
            },
        }
    }

    fn canned_forecast(&self) -> ForecastResponse {
        let forecastday = if self.empty_forecast.load(Ordering::SeqCst) {
            Vec::new()
        } else {
            vec![ForecastDay {
                date: NaiveDate::from_ymd_opt(2024, 11, 12).unwrap_or_default(),
                day: DaySummary {
                    maxtemp_c: 26.7,
                    maxtemp_f: 80.0,
                    mintemp_c: 15.6,
                    mintemp_f: 60.0,
                    avgtemp_c: Some(21.2),
                    avgtemp_f: Some(70.1),
                    condition: Some(ConditionInfo {
                        text: "Sunny".to_string(),
                        icon: None,
                        code: Some(1000),
                    }),
                    daily_chance_of_rain: Some(10),
                },
            }]
        };

        ForecastResponse {
            forecast: ForecastBlock { forecastday },
        }
    }

    fn mock_failure() -> WeatherApiError {
        WeatherApiError::ApiError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "mock provider failure".to_string(),
        }
    }
}

#[async_trait]
impl WeatherApi for MockWeatherProvider {
    async fn current(&self, _zip: &ZipCode) -> Result<CurrentResponse, WeatherApiError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_current.load(Ordering::SeqCst) {
            return Err(Self::mock_failure());
        }
        Ok(Self::canned_current())
    }

    async fn forecast(
        &self,
        _zip: &ZipCode,
        _days: u32,
    ) -> Result<ForecastResponse, WeatherApiError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_forecast.load(Ordering::SeqCst) {
            return Err(Self::mock_failure());
        }
        Ok(self.canned_forecast())
    }
}
