use crate::{
    error::{FetchError, GeocodeError},
    location::Coordinates,
    model::{ForecastEntry, WeatherSnapshot},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Upstream weather API surface.
///
/// One production implementation exists ([`openweather::OpenWeather`]);
/// the trait is the seam the app loop and tests work against.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;

    /// Top place name for the coordinates, `Ok(None)` when the lookup
    /// yields nothing. Callers substitute their own fallback label.
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>, GeocodeError>;
}

/// The two-stage fetch: current conditions first, then the forecast.
///
/// Sequential on purpose. A failed first stage means the forecast request
/// is never issued; both results are returned together so the caller can
/// apply them atomically.
pub async fn fetch_weather(
    api: &dyn WeatherApi,
    city: &str,
) -> Result<(WeatherSnapshot, Vec<ForecastEntry>), FetchError> {
    let snapshot = api.current_weather(city).await?;
    let forecast = api.forecast(city).await?;

    Ok((snapshot, forecast))
}
