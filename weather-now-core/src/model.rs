use serde::Serialize;

use crate::error::LookupError;

/// Number of hourly entries kept from the forecast.
pub const MAX_HOURS: usize = 24;

/// Place resolved from the first geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// First-level administrative area; empty when the service has none.
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    /// WMO weather interpretation code.
    pub weather_code: i32,
    /// Local observation time, e.g. `2024-01-01T12:00`.
    pub time: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    pub time: String,
    pub temperature_c: Option<f64>,
    pub precipitation_mm: f64,
    pub relative_humidity_pct: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
}

/// Upstream-ordered hourly forecast, capped at [`MAX_HOURS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HourlySeries(Vec<HourlyEntry>);

impl HourlySeries {
    pub fn new(entries: impl IntoIterator<Item = HourlyEntry>) -> Self {
        Self(entries.into_iter().take(MAX_HOURS).collect())
    }

    pub fn entries(&self) -> &[HourlyEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the forecast stage yields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub current: WeatherSnapshot,
    pub hourly: HourlySeries,
}

/// Everything a successful search produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: WeatherSnapshot,
    pub hourly: HourlySeries,
}

impl WeatherReport {
    pub fn new(location: Location, forecast: Forecast) -> Self {
        Self {
            location,
            current: forecast.current,
            hourly: forecast.hourly,
        }
    }
}

/// Lifecycle of the search session. Exactly one is current.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReport),
    Error {
        error: LookupError,
        /// Set when geocoding succeeded but the forecast call did not.
        location: Option<Location>,
    },
}

impl SearchState {
    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            SearchState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match self {
            SearchState::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}
