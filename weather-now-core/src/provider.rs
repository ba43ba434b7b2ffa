use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::LookupError,
    model::{Forecast, Location},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// The two upstream stages of a search.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a trimmed, non-empty query to its first matching place.
    async fn geocode(&self, query: &str) -> Result<Location, LookupError>;

    /// Current conditions and hourly series at the given place.
    async fn forecast(&self, location: &Location) -> Result<Forecast, LookupError>;
}

