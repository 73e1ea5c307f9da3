use std::fmt;

use crate::{WeatherRecord, error::WeatherError, hourly, view_state::ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastTab {
    #[default]
    Hours,
    Days,
}

impl ForecastTab {
    pub fn title(&self) -> &'static str {
        match self {
            ForecastTab::Hours => "Hours",
            ForecastTab::Days => "Days",
        }
    }

    pub const fn all() -> &'static [ForecastTab] {
        &[ForecastTab::Hours, ForecastTab::Days]
    }

    pub fn index(&self) -> usize {
        match self {
            ForecastTab::Hours => 0,
            ForecastTab::Days => 1,
        }
    }
}

impl fmt::Display for ForecastTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Tracks the active forecast tab and whether a switch is still animating.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: ForecastTab,
    transitioning: bool,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ForecastTab {
        self.active
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Switch tabs on explicit user selection. Returns whether the tab changed.
    pub fn select(&mut self, tab: ForecastTab) -> bool {
        if self.active == tab {
            return false;
        }
        self.active = tab;
        self.transitioning = true;
        true
    }

    /// Page-index selection: 0 is Hours, every other page shows Days.
    pub fn select_index(&mut self, index: usize) -> bool {
        let tab = if index == 0 { ForecastTab::Hours } else { ForecastTab::Days };
        self.select(tab)
    }

    /// The switch animation finished.
    pub fn settle(&mut self) {
        self.transitioning = false;
    }

    /// Records for the active tab. Hours are re-extracted from the selected
    /// day on every call since the selection may change between renders.
    pub fn displayed(&self, state: &ViewState) -> Result<Vec<WeatherRecord>, WeatherError> {
        match self.active {
            ForecastTab::Hours => hourly::extract(&state.current_day().hours_payload),
            ForecastTab::Days => Ok(state.days().to_vec()),
        }
    }
}
