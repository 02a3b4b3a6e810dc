use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{FetchError, GeocodeError},
    location::Coordinates,
    model::{ForecastEntry, WeatherSnapshot},
};

use super::WeatherApi;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Forecast entries carrying this timestamp text are the once-per-day
/// samples shown in the forecast row.
const MIDDAY_MARKER: &str = "12:00:00";

#[derive(Debug, Clone)]
pub struct OpenWeather {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeather {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Used by HTTP-level tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeather {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %truncate_body(&body), "Current weather request failed");
            return Err(FetchError::CityNotFound);
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(WeatherSnapshot {
            temperature_c: parsed.main.temp,
            condition: parsed.condition(),
            icon: parsed.icon(),
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %truncate_body(&body), "Forecast request failed");
            return Err(FetchError::ForecastUnavailable);
        }

        let body = res.text().await?;
        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        let entries = parsed
            .list
            .into_iter()
            .filter(|entry| entry.dt_txt.contains(MIDDAY_MARKER))
            .map(|entry| {
                let condition = entry.condition();
                let icon = entry.icon();
                ForecastEntry {
                    display_date: display_date(entry.dt),
                    temperature_c: entry.main.temp,
                    condition,
                    icon,
                }
            })
            .collect();

        Ok(entries)
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>, GeocodeError> {
        let url = format!("{}/geo/1.0/reverse", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let body = res.text().await?;
        let places: Vec<OwGeoPlace> = serde_json::from_str(&body)?;

        Ok(places.into_iter().next().map(|place| place.name))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwGeoPlace {
    name: String,
}

impl OwCurrentResponse {
    fn condition(&self) -> String {
        first_description(&self.weather)
    }

    fn icon(&self) -> String {
        first_icon(&self.weather)
    }
}

impl OwForecastEntry {
    fn condition(&self) -> String {
        first_description(&self.weather)
    }

    fn icon(&self) -> String {
        first_icon(&self.weather)
    }
}

fn first_description(weather: &[OwWeather]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn first_icon(weather: &[OwWeather]) -> String {
    weather.first().map(|w| w.icon.clone()).unwrap_or_default()
}

/// Short weekday plus day of month, e.g. "Mon 10".
fn display_date(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%a %-d").to_string())
        .unwrap_or_default()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenWeather {
        OpenWeather::with_base_url("KEY".to_string(), server.uri())
    }

    fn ts(date: &str) -> i64 {
        date.parse::<DateTime<Utc>>().expect("test timestamp").timestamp()
    }

    #[tokio::test]
    async fn current_weather_maps_the_paris_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Paris",
                "main": { "temp": 15.2 },
                "weather": [{ "description": "clear sky", "icon": "01d" }]
            })))
            .mount(&server)
            .await;

        let snapshot = provider(&server)
            .current_weather("Paris")
            .await
            .expect("current weather");

        assert_eq!(snapshot.temperature_c, 15.2);
        assert_eq!(snapshot.condition, "clear sky");
        assert_eq!(snapshot.icon, "01d");
        assert!(snapshot.icon_url().ends_with("01d@2x.png"));
    }

    #[tokio::test]
    async fn current_weather_404_is_city_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = provider(&server).current_weather("Atlantis").await.unwrap_err();

        assert!(matches!(err, FetchError::CityNotFound));
        assert_eq!(err.to_string(), "City Not Found");
    }

    #[tokio::test]
    async fn forecast_keeps_only_midday_entries_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    {
                        "dt": ts("2024-03-04T09:00:00Z"),
                        "dt_txt": "2024-03-04 09:00:00",
                        "main": { "temp": 9.0 },
                        "weather": [{ "description": "mist", "icon": "50d" }]
                    },
                    {
                        "dt": ts("2024-03-04T12:00:00Z"),
                        "dt_txt": "2024-03-04 12:00:00",
                        "main": { "temp": 11.5 },
                        "weather": [{ "description": "few clouds", "icon": "02d" }]
                    },
                    {
                        "dt": ts("2024-03-05T12:00:00Z"),
                        "dt_txt": "2024-03-05 12:00:00",
                        "main": { "temp": 13.0 },
                        "weather": [{ "description": "light rain", "icon": "10d" }]
                    },
                    {
                        "dt": ts("2024-03-05T15:00:00Z"),
                        "dt_txt": "2024-03-05 15:00:00",
                        "main": { "temp": 12.1 },
                        "weather": [{ "description": "light rain", "icon": "10d" }]
                    }
                ]
            })))
            .mount(&server)
            .await;

        let entries = provider(&server).forecast("Paris").await.expect("forecast");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_date, "Mon 4");
        assert_eq!(entries[0].temperature_c, 11.5);
        assert_eq!(entries[0].condition, "few clouds");
        assert_eq!(entries[1].display_date, "Tue 5");
        assert_eq!(entries[1].icon, "10d");
    }

    #[tokio::test]
    async fn forecast_failure_is_forecast_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = provider(&server).forecast("Atlantis").await.unwrap_err();

        assert!(matches!(err, FetchError::ForecastUnavailable));
        assert_eq!(err.to_string(), "Forecast not available");
    }

    #[tokio::test]
    async fn reverse_geocode_returns_the_top_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/reverse"))
            .and(query_param("limit", "1"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "Paris", "country": "FR" }
            ])))
            .mount(&server)
            .await;

        let coords = Coordinates {
            latitude: 48.85,
            longitude: 2.35,
        };
        let name = provider(&server).reverse_geocode(coords).await.expect("geocode");

        assert_eq!(name.as_deref(), Some("Paris"));
    }

    #[tokio::test]
    async fn reverse_geocode_empty_result_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let coords = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        let name = provider(&server).reverse_geocode(coords).await.expect("geocode");

        assert_eq!(name, None);
    }

    #[tokio::test]
    async fn reverse_geocode_error_status_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/reverse"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let coords = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        let err = provider(&server).reverse_geocode(coords).await.unwrap_err();

        assert!(matches!(err, GeocodeError::Status(status) if status.as_u16() == 500));
    }
}
