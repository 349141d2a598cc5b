pub mod mock;
pub mod service;
pub mod types;
pub mod weatherapi;

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use crate::zip::ZipCode;
use types::{CurrentResponse, ForecastResponse, WeatherSnapshot};
use weatherapi::WeatherApiError;

pub use service::WeatherService;

/// Forecast window requested from the provider.
pub const FORECAST_DAYS: u32 = 1;

pub type SnapshotCache = Cache<String, WeatherSnapshot>;

pub fn init_cache() -> SnapshotCache {
    Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(30 * 60)) // 30 minutes
        .build()
}

/// Provider-facing seam of the weather service. `WeatherApiClient` talks to
/// the real API; `MockWeatherProvider` serves canned payloads.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current(&self, zip: &ZipCode) -> Result<CurrentResponse, WeatherApiError>;

    async fn forecast(&self, zip: &ZipCode, days: u32)
        -> Result<ForecastResponse, WeatherApiError>;
}
