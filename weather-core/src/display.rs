//! Formatting rules shared by the current-conditions card and the forecast list.

use crate::{WeatherRecord, error::WeatherError};

pub const DEGREE_SUFFIX: &str = "℃";

/// Parse a numeric temperature string and drop the fractional part toward zero.
///
/// A trailing `℃` is accepted, so records produced by the hourly extractor
/// format the same way as raw API values.
pub fn truncate_temp(raw: &str) -> Result<i64, WeatherError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix(DEGREE_SUFFIX).unwrap_or(trimmed).trim();

    let value: f64 = number
        .parse()
        .map_err(|_| WeatherError::Format(format!("'{raw}' is not a temperature")))?;

    truncate_value(value)
}

/// Truncate a parsed temperature toward zero. Non-finite values and values
/// beyond the `i32` range are rejected.
pub fn truncate_value(value: f64) -> Result<i64, WeatherError> {
    if !value.is_finite() || value.abs() > f64::from(i32::MAX) {
        return Err(WeatherError::Format(format!("{value} is not a plausible temperature")));
    }

    Ok(value.trunc() as i64)
}

/// `21℃` for a current temperature, `5℃/12℃` for a day range.
pub fn temperature_label(record: &WeatherRecord) -> Result<String, WeatherError> {
    match record.current_temp() {
        Some(current) => Ok(format!("{}{DEGREE_SUFFIX}", truncate_temp(current)?)),
        None => range_label(record),
    }
}

pub fn range_label(record: &WeatherRecord) -> Result<String, WeatherError> {
    Ok(format!(
        "{}{DEGREE_SUFFIX}/{}{DEGREE_SUFFIX}",
        truncate_temp(&record.min_temp)?,
        truncate_temp(&record.max_temp)?,
    ))
}

/// The API omits the scheme from icon URLs.
pub fn icon_url(icon_ref: &str) -> String {
    if icon_ref.starts_with("http://") || icon_ref.starts_with("https://") {
        icon_ref.to_string()
    } else {
        format!("https:{icon_ref}")
    }
}
