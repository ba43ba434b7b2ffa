//! Core library for the `weather-now` CLI.
//!
//! This crate defines:
//! - Endpoint configuration
//! - The geocode → forecast search pipeline and its session state
//! - Shared domain models and the error taxonomy
//! - Text rendering of search results
//!
//! It is used by `weather-now-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod render;

pub use config::Config;
pub use error::{LookupError, Stage};
pub use lookup::{SearchFailure, WeatherLookup, run_pipeline};
pub use model::{
    Forecast, HourlyEntry, HourlySeries, Location, MAX_HOURS, SearchState, WeatherReport,
    WeatherSnapshot,
};
pub use provider::{OpenMeteoProvider, WeatherProvider};
