use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::WeatherError,
    model::{Forecast, ForecastRequest, WeatherRecord},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    last_updated: String,
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    /// Kept as raw JSON; hours are extracted lazily when a day is shown.
    hour: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaErrorDetail,
}

impl WaForecastResponse {
    fn into_forecast(self) -> Result<Forecast, WeatherError> {
        let location = self.location.name;

        let days = self
            .forecast
            .forecastday
            .into_iter()
            .map(|d| WeatherRecord {
                location: location.clone(),
                time_label: d.date,
                current_temp: None,
                min_temp: d.day.mintemp_c.to_string(),
                max_temp: d.day.maxtemp_c.to_string(),
                condition: d.day.condition.text,
                icon_ref: d.day.condition.icon,
                hours_payload: d.hour.to_string(),
            })
            .collect::<Vec<_>>();

        let today = days
            .first()
            .ok_or_else(|| WeatherError::Parse("response contained no forecast days".into()))?;

        let current = WeatherRecord {
            location: location.clone(),
            time_label: self.current.last_updated,
            current_temp: Some(self.current.temp_c.to_string()),
            min_temp: today.min_temp.clone(),
            max_temp: today.max_temp.clone(),
            condition: self.current.condition.text,
            icon_ref: self.current.condition.icon,
            hours_payload: today.hours_payload.clone(),
        };

        Ok(Forecast { current, days })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self, request), fields(location = %request.location, days = request.days))]
    async fn fetch(&self, request: &ForecastRequest) -> Result<Forecast, WeatherError> {
        let url = format!("{}/forecast.json", self.base_url);
        let days = request.days.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", request.location.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: WaForecastResponse = serde_json::from_str(&body)?;
        let forecast = parsed.into_forecast()?;

        debug!(days = forecast.days.len(), "forecast received");
        Ok(forecast)
    }
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<WaErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
