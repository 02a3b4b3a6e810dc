use serde::{Deserialize, Serialize};

/// Base URL pattern for OpenWeatherMap condition icons.
const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Current conditions for a single city at fetch time.
///
/// Produced fresh on every successful fetch; superseded wholesale by the
/// next fetch or cleared on error. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
}

/// One forecast sample, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Short weekday plus day of month, e.g. "Mon 10".
    pub display_date: String,
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
}

impl WeatherSnapshot {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

impl ForecastEntry {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Resolve an icon code (e.g. "01d") to its hosted 2x asset.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_URL_BASE}/{icon}@2x.png")
}
