//! Core library for the `weather` display.
//!
//! This crate defines:
//! - The normalized forecast model and the hourly payload extractor
//! - Display formatting rules for temperatures and icons
//! - View state with request sequencing, and the Hours/Days tab controller
//! - Configuration and the weatherapi.com provider
//!
//! It is used by `weather-cli`, but can also back other front-ends.

pub mod config;
pub mod display;
pub mod error;
pub mod hourly;
pub mod model;
pub mod provider;
pub mod tabs;
pub mod view_state;

pub use config::Config;
pub use error::WeatherError;
pub use model::{Forecast, ForecastRequest, WeatherRecord};
pub use provider::WeatherProvider;
pub use tabs::{ForecastTab, TabController};
pub use view_state::{FetchOutcome, RequestId, ViewState};
