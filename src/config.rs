use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub weather_api_key: String,
    pub weather_api_base_url: String,
    pub weather_current_path: String,
    pub weather_forecast_path: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            weather_api_key: env::var("WEATHER_API_KEY")
                .map_err(|_| anyhow::anyhow!("WEATHER_API_KEY not set"))?,
            weather_api_base_url: env::var("WEATHER_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.weatherapi.com/v1".to_string()),
            weather_current_path: env::var("WEATHER_API_CURRENT_PATH")
                .unwrap_or_else(|_| "/current.json".to_string()),
            weather_forecast_path: env::var("WEATHER_API_FORECAST_PATH")
                .unwrap_or_else(|_| "/forecast.json".to_string()),
        })
    }
}
