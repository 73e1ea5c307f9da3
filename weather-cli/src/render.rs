//! Text rendering of the current-conditions card and the forecast list.

use chrono::{DateTime, Local, Utc};
use weather_core::{
    ForecastTab, WeatherError, WeatherRecord,
    display::{icon_url, range_label, temperature_label},
};

const PLACEHOLDER: &str = "--";

/// Format errors show a placeholder instead of garbage.
fn or_placeholder(label: Result<String, WeatherError>, record: &WeatherRecord) -> String {
    label.unwrap_or_else(|err| {
        tracing::warn!(time = %record.time_label, error = %err, "cannot format temperature");
        PLACEHOLDER.to_string()
    })
}

pub fn current_card(record: &WeatherRecord, updated_at: Option<DateTime<Utc>>) -> String {
    if record.location.is_empty() && record.time_label.is_empty() {
        return "No weather data yet.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{}  [{}]\n", record.time_label, icon_url(&record.icon_ref)));
    out.push_str(&format!("{}\n", record.location));
    out.push_str(&format!("  {}\n", or_placeholder(temperature_label(record), record)));
    out.push_str(&format!("  {}\n", record.condition));
    out.push_str(&format!("  {}\n", or_placeholder(range_label(record), record)));

    if let Some(ts) = updated_at {
        out.push_str(&format!(
            "Updated {}\n",
            ts.with_timezone(&Local).format("%H:%M")
        ));
    }

    out
}

pub fn tab_header(active: ForecastTab) -> String {
    ForecastTab::all()
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.title())
            } else {
                format!(" {} ", tab.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn list_entry(record: &WeatherRecord) -> String {
    format!(
        "{:<17} {:<24} {:>10}  {}",
        record.time_label,
        record.condition,
        or_placeholder(temperature_label(record), record),
        icon_url(&record.icon_ref),
    )
}

pub fn forecast_list(active: ForecastTab, records: &[WeatherRecord]) -> String {
    let mut out = tab_header(active);
    out.push('\n');

    if records.is_empty() {
        out.push_str("  (nothing to show)\n");
    }
    for record in records {
        out.push_str(&list_entry(record));
        out.push('\n');
    }

    out
}
