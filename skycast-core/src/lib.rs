//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind the `WeatherApi` trait
//! - The application state store (actions, reducer, effects)
//! - The input debouncer and the persisted last-city preference
//!
//! It is used by `skycast-app`, but can also be reused by other binaries or services.

pub mod config;
pub mod debounce;
pub mod error;
pub mod location;
pub mod model;
pub mod prefs;
pub mod provider;
pub mod store;

pub use config::Config;
pub use debounce::{DEFAULT_QUIET_WINDOW, Debouncer};
pub use error::{FetchError, GeocodeError, LocationError};
pub use location::{ConfiguredLocation, Coordinates, LocationSource};
pub use model::{ForecastEntry, WeatherSnapshot, icon_url};
pub use prefs::{FilePreferences, PreferenceStore};
pub use provider::{WeatherApi, fetch_weather, openweather::OpenWeather};
pub use store::{Action, AppState, Effect, Theme, update};

/// Label shown when reverse geocoding cannot name the user's position.
pub const FALLBACK_CITY: &str = "Unknown City";
