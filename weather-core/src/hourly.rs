//! Turns a day's raw hourly payload into displayable records.

use serde::Deserialize;

use crate::{
    WeatherRecord,
    display::{DEGREE_SUFFIX, truncate_temp, truncate_value},
    error::WeatherError,
};

#[derive(Debug, Deserialize)]
struct HourEntry {
    time: String,
    temp_c: Temperature,
    condition: HourCondition,
}

#[derive(Debug, Deserialize)]
struct HourCondition {
    text: String,
    icon: String,
}

/// weatherapi.com sends numbers, cached payloads may carry strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Temperature {
    Number(f64),
    Text(String),
}

impl Temperature {
    fn truncated(&self) -> Result<i64, WeatherError> {
        match self {
            Temperature::Number(value) => truncate_value(*value),
            Temperature::Text(raw) => truncate_temp(raw),
        }
    }
}

/// Parse a JSON array of hourly entries, preserving order.
///
/// An empty payload yields no records. Malformed JSON or a missing field is a
/// [`WeatherError::Parse`]; nothing is returned for the entries that did parse.
pub fn extract(hours_payload: &str) -> Result<Vec<WeatherRecord>, WeatherError> {
    if hours_payload.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<HourEntry> = serde_json::from_str(hours_payload)?;

    entries
        .into_iter()
        .map(|entry| {
            let temp = entry.temp_c.truncated()?;
            Ok(WeatherRecord {
                location: String::new(),
                time_label: entry.time,
                current_temp: Some(format!("{temp}{DEGREE_SUFFIX}")),
                min_temp: String::new(),
                max_temp: String::new(),
                condition: entry.condition.text,
                icon_ref: entry.condition.icon,
                hours_payload: String::new(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_yield_nothing() {
        assert!(extract("").unwrap().is_empty());
        assert!(extract("   ").unwrap().is_empty());
        assert!(extract("[]").unwrap().is_empty());
    }

    #[test]
    fn single_entry_is_truncated_not_rounded() {
        let payload =
            r#"[{"time":"14:00","temp_c":"21.9","condition":{"text":"Clear","icon":"//x/y.png"}}]"#;
        let records = extract(payload).unwrap();

        assert_eq!(records.len(), 1);
        let hour = &records[0];
        assert_eq!(hour.current_temp.as_deref(), Some("21℃"));
        assert_eq!(hour.icon_ref, "//x/y.png");
        assert_eq!(hour.time_label, "14:00");
        assert_eq!(hour.condition, "Clear");
        assert_eq!(hour.location, "");
        assert_eq!(hour.min_temp, "");
        assert_eq!(hour.max_temp, "");
        assert_eq!(hour.hours_payload, "");
    }

    #[test]
    fn numeric_temperatures_and_extra_fields_are_accepted() {
        let payload = r#"[
            {"time":"2024-05-01 00:00","time_epoch":1714521600,"temp_c":-2.6,"is_day":0,
             "condition":{"text":"Mist","icon":"//cdn/night/143.png","code":1030}}
        ]"#;
        let records = extract(payload).unwrap();
        assert_eq!(records[0].current_temp.as_deref(), Some("-2℃"));
    }

    #[test]
    fn order_and_count_are_preserved() {
        let payload = (0..24)
            .map(|h| {
                format!(
                    r#"{{"time":"{h:02}:00","temp_c":{h}.5,"condition":{{"text":"c{h}","icon":"//i/{h}.png"}}}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        let records = extract(&format!("[{payload}]")).unwrap();

        assert_eq!(records.len(), 24);
        for (h, record) in records.iter().enumerate() {
            assert_eq!(record.time_label, format!("{h:02}:00"));
            assert_eq!(record.current_temp.as_deref(), Some(format!("{h}℃").as_str()));
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(extract("[{"), Err(WeatherError::Parse(_))));
        assert!(matches!(extract("{\"time\":\"1\"}"), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn missing_field_fails_whole_payload() {
        let payload = r#"[
            {"time":"00:00","temp_c":1,"condition":{"text":"a","icon":"b"}},
            {"time":"01:00","temp_c":1,"condition":{"text":"a"}}
        ]"#;
        assert!(matches!(extract(payload), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn out_of_range_numeric_temperature_is_a_format_error() {
        let payload = r#"[{"time":"00:00","temp_c":1e30,"condition":{"text":"a","icon":"b"}}]"#;
        assert!(matches!(extract(payload), Err(WeatherError::Format(_))));
    }

    #[test]
    fn non_numeric_temperature_is_a_format_error() {
        let payload = r#"[{"time":"00:00","temp_c":"hot","condition":{"text":"a","icon":"b"}}]"#;
        assert!(matches!(extract(payload), Err(WeatherError::Format(_))));
    }
}
