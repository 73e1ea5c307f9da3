use crate::{
    Config, Forecast, ForecastRequest, error::WeatherError,
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Fetch collaborator: produces the current record and the day list together,
/// or an error without touching any view state.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, request: &ForecastRequest) -> Result<Forecast, WeatherError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?.to_owned();

    let provider = match config.base_url.as_deref() {
        Some(base_url) => WeatherApiProvider::with_base_url(api_key, base_url)?,
        None => WeatherApiProvider::new(api_key)?,
    };

    Ok(Box::new(provider))
}

/// Build the request for `location` using the configured forecast length.
pub fn forecast_request(config: &Config, location: String) -> ForecastRequest {
    ForecastRequest { location, days: config.forecast_days() }
}
