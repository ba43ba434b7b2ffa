//! Failure taxonomy for a single search.

use serde::Serialize;
use thiserror::Error;

/// Which of the two upstream calls an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Geocoding,
    Forecast,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoding => "Geocoding",
            Stage::Forecast => "Forecast",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupError {
    #[error("Please enter a city name.")]
    Validation,

    #[error("No location found. Try a different city name.")]
    NotFound,

    #[error("{stage} failed ({status})")]
    Upstream { stage: Stage, status: u16 },

    #[error("{}", or_generic(.message))]
    Unknown { message: String },
}

fn or_generic(message: &str) -> &str {
    if message.is_empty() { "Unknown error" } else { message }
}

impl LookupError {
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown { message: message.into() }
    }

    /// HTTP status carried by an upstream failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Errors the user can fix by changing the query.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation | Self::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_what_the_user_sees() {
        assert_eq!(LookupError::Validation.to_string(), "Please enter a city name.");
        assert_eq!(
            LookupError::NotFound.to_string(),
            "No location found. Try a different city name."
        );
        assert_eq!(
            LookupError::Upstream { stage: Stage::Geocoding, status: 500 }.to_string(),
            "Geocoding failed (500)"
        );
        assert_eq!(
            LookupError::Upstream { stage: Stage::Forecast, status: 503 }.to_string(),
            "Forecast failed (503)"
        );
    }

    #[test]
    fn unknown_falls_back_to_generic_message() {
        assert_eq!(LookupError::unknown("").to_string(), "Unknown error");
        assert_eq!(LookupError::unknown("boom").to_string(), "boom");
    }

    #[test]
    fn status_only_for_upstream() {
        let err = LookupError::Upstream { stage: Stage::Forecast, status: 404 };
        assert_eq!(err.status(), Some(404));
        assert_eq!(LookupError::NotFound.status(), None);
    }

    #[test]
    fn user_errors() {
        assert!(LookupError::Validation.is_user_error());
        assert!(LookupError::NotFound.is_user_error());
        assert!(!LookupError::unknown("x").is_user_error());
    }
}
