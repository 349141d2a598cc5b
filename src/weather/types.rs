use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentResponse {
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub last_updated: Option<String>,
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Option<ConditionInfo>,
    pub wind_mph: Option<f64>,
    pub wind_kph: Option<f64>,
    pub humidity: Option<i32>,
    pub cloud: Option<i32>,
    pub feelslike_c: Option<f64>,
    pub feelslike_f: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionInfo {
    pub text: String,
    pub icon: Option<String>,
    pub code: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResponse {
    pub forecast: ForecastBlock,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastBlock {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DaySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: Option<f64>,
    pub avgtemp_f: Option<f64>,
    pub condition: Option<ConditionInfo>,
    pub daily_chance_of_rain: Option<i32>,
}

/// Merged result of one fetch. Either half may be absent when its provider
/// call failed; the snapshot is immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub current: Option<CurrentConditions>,
    pub forecast: Option<DaySummary>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.forecast.is_none()
    }
}

/// What a lookup hands back to the web layer. `cached` tells whether `data`
/// came out of the store or was fetched on this request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub data: WeatherSnapshot,
    pub cached: bool,
}
