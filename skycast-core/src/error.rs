//! Typed errors for the weather resolution flow.
//!
//! The display strings of [`FetchError::CityNotFound`] and
//! [`FetchError::ForecastUnavailable`] are shown verbatim in the error
//! region of the UI, so they stay short and user-facing.

use thiserror::Error;

/// Failures of the two-stage weather fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The current-weather request came back with a non-success status.
    #[error("City Not Found")]
    CityNotFound,

    /// Current weather succeeded but the forecast request did not.
    #[error("Forecast not available")]
    ForecastUnavailable,

    #[error("Weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather response could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the reverse-geocoding lookup.
///
/// Callers are expected to log these and substitute a fallback city label;
/// they never surface to the user.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Reverse geocoding request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Reverse geocoding returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Reverse geocoding response could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the position lookup. Logged only, never user-facing.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("No coordinates configured")]
    Unavailable,
}
