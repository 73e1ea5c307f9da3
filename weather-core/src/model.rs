use serde::{Deserialize, Serialize};

/// One normalized weather data point: the current observation, a forecast day
/// or an hour derived from a day's payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Location name; empty for hourly-derived records.
    pub location: String,
    pub time_label: String,
    /// Only set for "now" and for hourly records.
    pub current_temp: Option<String>,
    pub min_temp: String,
    pub max_temp: String,
    pub condition: String,
    /// Protocol-relative icon URL as sent by the API, e.g. `//cdn.weatherapi.com/...`.
    pub icon_ref: String,
    /// Raw JSON text of the nested hourly array. Empty for non-day records.
    pub hours_payload: String,
}

impl WeatherRecord {
    /// Current temperature, treating an empty string like an absent one.
    pub fn current_temp(&self) -> Option<&str> {
        self.current_temp.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Day records carry an hourly payload; only those can become the selected day.
    pub fn is_day(&self) -> bool {
        !self.hours_payload.trim().is_empty()
    }
}

/// What a single fetch asks the provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub location: String,
    pub days: u8,
}

/// Result of a successful fetch: the record for "now" plus the daily forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub current: WeatherRecord,
    pub days: Vec<WeatherRecord>,
}
