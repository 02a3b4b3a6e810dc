//! Position lookup behind a trait, so the shell can ask "where am I?"
//! without caring where the answer comes from.
//!
//! A terminal process has no browser-style geolocation prompt; the
//! production source reads optional home coordinates from configuration.
//! An unset position behaves like a denied prompt: the caller logs and
//! skips auto-detection.

use crate::error::LocationError;
use async_trait::async_trait;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position source backed by configured coordinates.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationSource for ConfiguredLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::Unavailable)
    }
}
