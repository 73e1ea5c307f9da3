use thiserror::Error;

/// Errors raised while fetching or normalizing forecast data.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Format error: {0}")]
    Format(String),
}

impl WeatherError {
    /// Short message suitable for the status line of the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Network(_) => "Could not reach the weather service. Check your connection.",
            WeatherError::Api { status: 401 | 403, .. } => {
                "The weather service rejected the API key. Run `weather configure`."
            }
            WeatherError::Api { .. } => "The weather service returned an error.",
            WeatherError::Parse(_) => "The weather service sent data that could not be read.",
            WeatherError::Format(_) => "Some weather values could not be displayed.",
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_mentions_status_and_message() {
        let err = WeatherError::Api { status: 400, message: "No matching location found.".into() };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("No matching location found."));
    }

    #[test]
    fn rejected_key_points_to_configure() {
        let err = WeatherError::Api { status: 403, message: "disabled".into() };
        assert!(err.user_message().contains("weather configure"));
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: WeatherError = serde_json::from_str::<serde_json::Value>("[").unwrap_err().into();
        assert!(matches!(err, WeatherError::Parse(_)));
    }
}
