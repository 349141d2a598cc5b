use std::sync::Arc;

use chrono::Utc;

use super::types::{DaySummary, ForecastResponse, WeatherReport, WeatherSnapshot};
use super::{SnapshotCache, WeatherApi, FORECAST_DAYS};
use crate::zip::ZipCode;

const CACHE_KEY_PREFIX: &str = "weather_data_";

pub fn cache_key(zip: &ZipCode) -> String {
    format!("{CACHE_KEY_PREFIX}{zip}")
}

/// Orchestrates one weather lookup: cache check, the two provider calls on a
/// miss, the merge, and the cache write.
pub struct WeatherService {
    provider: Arc<dyn WeatherApi>,
    cache: SnapshotCache,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherApi>, cache: SnapshotCache) -> Self {
        Self { provider, cache }
    }

    /// Fetch current conditions and the one-day forecast for a zip code.
    ///
    /// Returns the cached snapshot when one is live. On a miss both provider
    /// endpoints are queried concurrently; a failed call degrades its half of
    /// the snapshot to `None` and never aborts the other. The merged snapshot
    /// is cached for 30 minutes unless both halves came back empty.
    pub async fn fetch(&self, zip: &ZipCode) -> WeatherReport {
        let key = cache_key(zip);

        if let Some(snapshot) = self.cache.get(&key).await {
            tracing::debug!(%zip, "serving weather data from cache");
            return WeatherReport {
                data: snapshot,
                cached: true,
            };
        }

        let (current_result, forecast_result) = tokio::join!(
            self.provider.current(zip),
            self.provider.forecast(zip, FORECAST_DAYS),
        );

        let current = match current_result {
            Ok(response) => Some(response.current),
            Err(e) => {
                tracing::error!(%zip, error = %e, "failed to fetch current conditions");
                None
            }
        };

        let forecast = match forecast_result {
            Ok(response) => first_forecast_day(response),
            Err(e) => {
                tracing::error!(%zip, error = %e, "failed to fetch forecast");
                None
            }
        };

        let snapshot = WeatherSnapshot {
            current,
            forecast,
            fetched_at: Utc::now(),
        };

        // A snapshot with nothing in it is not worth pinning for 30 minutes;
        // the next request gets a fresh shot at the provider.
        if !snapshot.is_empty() {
            self.cache.insert(key, snapshot.clone()).await;
        }

        WeatherReport {
            data: snapshot,
            cached: false,
        }
    }
}

// The provider nests the requested day under `forecast.forecastday[0].day`.
fn first_forecast_day(response: ForecastResponse) -> Option<DaySummary> {
    response.forecast.forecastday.into_iter().next().map(|d| d.day)
}
