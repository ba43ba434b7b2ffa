//! City search session: validate, geocode, then forecast.

use crate::{
    error::LookupError,
    model::{Location, SearchState, WeatherReport},
    provider::WeatherProvider,
};

/// Why a pipeline run stopped, plus the location if geocoding got that far.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFailure {
    pub error: LookupError,
    pub location: Option<Location>,
}

impl From<LookupError> for SearchFailure {
    fn from(error: LookupError) -> Self {
        Self { error, location: None }
    }
}

impl From<SearchFailure> for SearchState {
    fn from(failure: SearchFailure) -> Self {
        SearchState::Error {
            error: failure.error,
            location: failure.location,
        }
    }
}

/// Run one search end to end. No I/O happens for a blank query.
pub async fn run_pipeline<P>(provider: &P, query: &str) -> Result<WeatherReport, SearchFailure>
where
    P: WeatherProvider + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::Validation.into());
    }

    let location = provider.geocode(query).await?;
    tracing::info!(
        name = %location.name,
        country = %location.country,
        lat = location.latitude,
        lon = location.longitude,
        "resolved location"
    );

    match provider.forecast(&location).await {
        Ok(forecast) => Ok(WeatherReport::new(location, forecast)),
        Err(error) => Err(SearchFailure {
            error,
            location: Some(location),
        }),
    }
}

/// A search session owning its provider and the current [`SearchState`].
///
/// `search` takes `&mut self`, so a session can never have two searches in
/// flight; callers wanting parallel lookups use separate sessions.
#[derive(Debug)]
pub struct WeatherLookup<P> {
    provider: P,
    state: SearchState,
}

impl<P: WeatherProvider> WeatherLookup<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Search for `query` and return the resulting state.
    ///
    /// Any previous result or error is dropped as soon as the search starts.
    pub async fn search(&mut self, query: &str) -> &SearchState {
        self.state = SearchState::Loading;
        tracing::debug!(query, "search started");

        self.state = match run_pipeline(&self.provider, query).await {
            Ok(report) => SearchState::Success(report),
            Err(failure) => {
                if failure.error.is_user_error() {
                    tracing::info!(query, error = %failure.error, "search rejected");
                } else {
                    tracing::error!(query, error = %failure.error, "search failed");
                }
                failure.into()
            }
        };

        &self.state
    }
}
