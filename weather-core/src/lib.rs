//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherProvider`] trait
//! - Presentation derivation (rounding, daily forecast sampling, theme)
//! - The query controller that turns lookups into view state
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;

pub use chrono::Locale;
pub use config::Config;
pub use controller::{QueryController, QueryPhase, QueryState, QueryTicket, fetch_report};
pub use error::WeatherError;
pub use model::{CurrentWeather, ForecastDay, Theme, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
