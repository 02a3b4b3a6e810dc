//! Application state and its reducer.
//!
//! All state mutations happen here. The shell calls
//! [`update`] for every action and executes the returned effects; fetch
//! results come back as further actions stamped with the generation they
//! were started under, so a superseded request can never clobber newer
//! state.

use crate::model::{ForecastEntry, WeatherSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The whole UI state, owned by the event loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub city_query: String,
    pub current: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastEntry>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub theme: Theme,
    /// Generation of the most recently started fetch. Completions carrying
    /// an older stamp are discarded.
    pub fetch_seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Startup, with whatever city the preference store held.
    Bootstrap { stored_city: Option<String> },
    /// A keystroke edited the input line.
    InputChanged(String),
    /// Debounced or explicit submission of the typed city.
    SubmitCity(String),
    /// Startup location detection produced a city name.
    CityResolved(String),
    FetchSucceeded {
        seq: u64,
        weather: WeatherSnapshot,
        forecast: Vec<ForecastEntry>,
    },
    FetchFailed {
        seq: u64,
        message: String,
    },
    ToggleTheme,
}

/// Side effects for the shell to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchWeather { city: String, seq: u64 },
    PersistCity(String),
    DetectLocation,
}

pub fn update(state: &mut AppState, action: Action) -> Vec<Effect> {
    match action {
        Action::Bootstrap { stored_city } => match stored_city {
            Some(city) if !city.trim().is_empty() => {
                state.city_query = city.clone();
                begin_fetch(state, city)
            }
            _ => vec![Effect::DetectLocation],
        },

        Action::InputChanged(text) => {
            state.city_query = text;
            vec![]
        }

        Action::SubmitCity(city) | Action::CityResolved(city) => {
            if city.trim().is_empty() {
                return vec![];
            }

            state.city_query = city.clone();
            let mut effects = begin_fetch(state, city.clone());
            effects.push(Effect::PersistCity(city));
            effects
        }

        Action::FetchSucceeded {
            seq,
            weather,
            forecast,
        } => {
            if seq != state.fetch_seq {
                tracing::debug!(seq, current = state.fetch_seq, "Discarding stale fetch result");
                return vec![];
            }

            state.is_loading = false;
            state.last_error = None;
            state.current = Some(weather);
            state.forecast = forecast;
            vec![]
        }

        Action::FetchFailed { seq, message } => {
            if seq != state.fetch_seq {
                tracing::debug!(seq, current = state.fetch_seq, "Discarding stale fetch failure");
                return vec![];
            }

            state.is_loading = false;
            state.current = None;
            state.forecast.clear();
            state.last_error = Some(message);
            vec![]
        }

        Action::ToggleTheme => {
            state.theme = state.theme.toggled();
            vec![]
        }
    }
}

fn begin_fetch(state: &mut AppState, city: String) -> Vec<Effect> {
    state.fetch_seq += 1;
    state.is_loading = true;
    state.last_error = None;

    vec![Effect::FetchWeather {
        city,
        seq: state.fetch_seq,
    }]
}
