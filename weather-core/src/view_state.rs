//! State behind the current-conditions card and the forecast list.
//!
//! The UI loop owns a single [`ViewState`]; it is only changed through
//! [`ViewState::apply_fetch_result`], [`ViewState::select_day`] and
//! [`ViewState::complete_fetch`].

use chrono::{DateTime, Utc};

use crate::{Forecast, WeatherRecord, error::WeatherError};

/// Identifies one fetch. Ids grow monotonically per [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// What happened to a completed fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was started after this one; its result was dropped.
    Stale,
    /// The fetch failed; the last known state stays visible.
    Failed(WeatherError),
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    current_day: WeatherRecord,
    days: Vec<WeatherRecord>,
    updated_at: Option<DateTime<Utc>>,
    latest_request: u64,
}

impl ViewState {
    pub fn current_day(&self) -> &WeatherRecord {
        &self.current_day
    }

    pub fn days(&self) -> &[WeatherRecord] {
        &self.days
    }

    /// Time of the last applied fetch, `None` before the first one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Replace the selected day and the day list together.
    pub fn apply_fetch_result(&mut self, current: WeatherRecord, days: Vec<WeatherRecord>) {
        self.current_day = current;
        self.days = days;
        self.updated_at = Some(Utc::now());
    }

    /// Make `record` the selected day. The hourly list follows on the next render.
    pub fn select_day(&mut self, record: WeatherRecord) {
        self.current_day = record;
    }

    /// Register a new fetch; any fetch started earlier becomes stale.
    pub fn begin_fetch(&mut self) -> RequestId {
        self.latest_request += 1;
        RequestId(self.latest_request)
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        id.0 == self.latest_request
    }

    /// Apply the result of fetch `id` if it is still the newest one.
    pub fn complete_fetch(
        &mut self,
        id: RequestId,
        result: Result<Forecast, WeatherError>,
    ) -> FetchOutcome {
        if !self.is_latest(id) {
            tracing::debug!(request = id.0, latest = self.latest_request, "dropping stale fetch result");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(forecast) => {
                self.apply_fetch_result(forecast.current, forecast.days);
                FetchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(request = id.0, error = %err, "fetch failed, keeping last known state");
                FetchOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: &str, label: &str) -> WeatherRecord {
        WeatherRecord {
            location: location.into(),
            time_label: label.into(),
            min_temp: "1".into(),
            max_temp: "2".into(),
            hours_payload: "[]".into(),
            ..Default::default()
        }
    }

    fn forecast(location: &str) -> Forecast {
        Forecast {
            current: record(location, "now"),
            days: vec![record(location, "day-1"), record(location, "day-2")],
        }
    }

    #[test]
    fn starts_empty() {
        let state = ViewState::default();
        assert_eq!(state.current_day(), &WeatherRecord::default());
        assert!(state.days().is_empty());
        assert!(state.updated_at().is_none());
    }

    #[test]
    fn fetch_result_replaces_both_fields() {
        let mut state = ViewState::default();
        state.apply_fetch_result(record("Oslo", "now"), vec![record("Oslo", "d1")]);
        assert_eq!(state.current_day().location, "Oslo");
        assert_eq!(state.days().len(), 1);

        state.apply_fetch_result(record("Rome", "now"), vec![]);
        assert_eq!(state.current_day().location, "Rome");
        assert!(state.days().is_empty());
        assert!(state.updated_at().is_some());
    }

    #[test]
    fn select_day_keeps_day_list() {
        let mut state = ViewState::default();
        let f = forecast("Oslo");
        state.apply_fetch_result(f.current.clone(), f.days.clone());

        state.select_day(f.days[1].clone());
        assert_eq!(state.current_day().time_label, "day-2");
        assert_eq!(state.days(), f.days.as_slice());
    }

    #[test]
    fn newest_fetch_is_applied() {
        let mut state = ViewState::default();
        let id = state.begin_fetch();
        assert!(matches!(state.complete_fetch(id, Ok(forecast("Oslo"))), FetchOutcome::Applied));
        assert_eq!(state.current_day().location, "Oslo");
    }

    #[test]
    fn slower_older_fetch_cannot_overwrite_newer_data() {
        let mut state = ViewState::default();
        let first = state.begin_fetch();
        let second = state.begin_fetch();
        assert!(first < second);

        assert!(matches!(state.complete_fetch(second, Ok(forecast("Rome"))), FetchOutcome::Applied));
        assert!(matches!(state.complete_fetch(first, Ok(forecast("Oslo"))), FetchOutcome::Stale));

        assert_eq!(state.current_day().location, "Rome");
        assert!(state.days().iter().all(|d| d.location == "Rome"));
    }

    #[test]
    fn failure_leaves_last_known_state() {
        let mut state = ViewState::default();
        let id = state.begin_fetch();
        state.complete_fetch(id, Ok(forecast("Oslo")));
        let before = state.updated_at();

        let id = state.begin_fetch();
        let outcome = state.complete_fetch(id, Err(WeatherError::Parse("bad body".into())));

        assert!(matches!(outcome, FetchOutcome::Failed(WeatherError::Parse(_))));
        assert_eq!(state.current_day().location, "Oslo");
        assert_eq!(state.days().len(), 2);
        assert_eq!(state.updated_at(), before);
    }
}
