use weather_core::{
    FetchOutcome, ForecastRequest, ForecastTab, TabController, ViewState, WeatherProvider,
    WeatherRecord,
};

use crate::render;

/// UI-side owner of the view state: one provider, one location, one set of tabs.
#[derive(Debug)]
pub struct Session {
    provider: Box<dyn WeatherProvider>,
    request: ForecastRequest,
    state: ViewState,
    tabs: TabController,
}

impl Session {
    pub fn new(provider: Box<dyn WeatherProvider>, request: ForecastRequest) -> Self {
        Self {
            provider,
            request,
            state: ViewState::default(),
            tabs: TabController::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn active_tab(&self) -> ForecastTab {
        self.tabs.active()
    }

    /// Fetch and apply the forecast unless a newer sync was started meanwhile.
    pub async fn sync(&mut self) -> FetchOutcome {
        let id = self.state.begin_fetch();
        let result = self.provider.fetch(&self.request).await;
        self.state.complete_fetch(id, result)
    }

    pub fn location(&self) -> &str {
        &self.request.location
    }

    /// Fetch the forecast for another location. The new location is kept only
    /// when its result is applied; otherwise the last known state stays visible.
    pub async fn search(&mut self, location: &str) -> FetchOutcome {
        let request = ForecastRequest {
            location: location.trim().to_string(),
            days: self.request.days,
        };

        let id = self.state.begin_fetch();
        let result = self.provider.fetch(&request).await;
        let outcome = self.state.complete_fetch(id, result);

        if matches!(outcome, FetchOutcome::Applied) {
            self.request = request;
        }
        outcome
    }

    pub fn select_tab(&mut self, tab: ForecastTab) {
        self.tabs.select(tab);
        // Terminal output has no switch animation.
        self.tabs.settle();
    }

    /// Returns false for hourly entries, which cannot become the selected day.
    pub fn select_day(&mut self, record: &WeatherRecord) -> bool {
        if !record.is_day() {
            return false;
        }
        self.state.select_day(record.clone());
        true
    }

    pub fn render(&self) -> String {
        let mut out = render::current_card(self.state.current_day(), self.state.updated_at());
        out.push('\n');

        match self.tabs.displayed(&self.state) {
            Ok(records) => out.push_str(&render::forecast_list(self.tabs.active(), &records)),
            Err(err) => {
                tracing::warn!(error = %err, "cannot build forecast list");
                out.push_str(&render::tab_header(self.tabs.active()));
                out.push_str(&format!("\n  {}\n", err.user_message()));
            }
        }

        out
    }
}
