//! Rendering: the whole screen is rebuilt from `AppState` after every
//! action. Line builders are plain functions of their props; the theme
//! only picks colors, never layout.

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use skycast_core::{AppState, ForecastEntry, Theme, WeatherSnapshot};
use std::io::{Write, stdout};

const PLACEHOLDER: &str = "Enter a city...";

struct Palette {
    text: Color,
    accent: Color,
    dim: Color,
    error: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            text: Color::Black,
            accent: Color::DarkBlue,
            dim: Color::DarkGrey,
            error: Color::DarkRed,
        },
        Theme::Dark => Palette {
            text: Color::White,
            accent: Color::Cyan,
            dim: Color::Grey,
            error: Color::Red,
        },
    }
}

pub fn draw(state: &AppState) -> Result<()> {
    let mut out = stdout();
    let colors = palette(state.theme);

    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(
        out,
        SetForegroundColor(colors.accent),
        SetAttribute(Attribute::Bold),
        Print("Skycast"),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(colors.dim),
        Print("  Ctrl+T light/dark · Enter fetch · Esc quit\r\n\r\n"),
        SetForegroundColor(colors.text),
    )?;

    for line in screen_lines(state) {
        if state.last_error.as_deref() == Some(line.as_str()) {
            queue!(
                out,
                SetForegroundColor(colors.error),
                Print(&line),
                SetForegroundColor(colors.text),
            )?;
        } else {
            queue!(out, Print(&line))?;
        }
        queue!(out, Print("\r\n"))?;
    }

    queue!(out, ResetColor)?;
    out.flush()?;

    Ok(())
}

/// The full body of the screen, minus colors.
pub fn screen_lines(state: &AppState) -> Vec<String> {
    let mut lines = Vec::new();

    let query: &str = if state.city_query.is_empty() {
        PLACEHOLDER
    } else {
        &state.city_query
    };
    lines.push(format!("City: {query}"));
    lines.push(String::new());

    if state.is_loading {
        lines.push("Fetching weather...".to_string());
    }
    if let Some(message) = &state.last_error {
        lines.push(message.clone());
    }

    if let Some(weather) = &state.current {
        lines.push(String::new());
        lines.extend(current_card_lines(&state.city_query, weather));
    }

    if !state.forecast.is_empty() {
        lines.push(String::new());
        lines.push("5-Day Forecast".to_string());
        for entry in &state.forecast {
            lines.push(String::new());
            lines.extend(forecast_card_lines(entry));
        }
    }

    lines
}

/// The current-conditions card.
pub fn current_card_lines(city: &str, weather: &WeatherSnapshot) -> Vec<String> {
    vec![
        format!("┌ {city}"),
        format!("│ {}°C  {}", weather.temperature_c, weather.condition),
        format!("│ {}", weather.icon_url()),
    ]
}

/// One forecast-day card; same shape as the current card, keyed by date.
pub fn forecast_card_lines(entry: &ForecastEntry) -> Vec<String> {
    vec![
        format!("┌ {}", entry.display_date),
        format!("│ {}°C  {}", entry.temperature_c, entry.condition),
        format!("│ {}", entry.icon_url()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: 15.2,
            condition: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    #[test]
    fn current_card_shows_temperature_condition_and_icon() {
        let lines = current_card_lines("Paris", &paris_snapshot());

        assert!(lines[0].contains("Paris"));
        assert!(lines[1].contains("15.2°C"));
        assert!(lines[1].contains("clear sky"));
        assert!(lines[2].ends_with("01d@2x.png"));
    }

    #[test]
    fn forecast_card_is_keyed_by_display_date() {
        let entry = ForecastEntry {
            display_date: "Mon 4".to_string(),
            temperature_c: 11.5,
            condition: "few clouds".to_string(),
            icon: "02d".to_string(),
        };

        let lines = forecast_card_lines(&entry);
        assert!(lines[0].contains("Mon 4"));
        assert!(lines[1].contains("11.5°C"));
        assert!(lines[2].ends_with("02d@2x.png"));
    }

    #[test]
    fn empty_query_shows_the_placeholder() {
        let state = AppState::default();

        let body = screen_lines(&state).join("\n");
        assert!(body.contains("Enter a city..."));
        assert!(!body.contains("Fetching"));
    }

    #[test]
    fn loading_and_error_lines_appear_in_the_fixed_region() {
        let mut state = AppState {
            city_query: "Atlantis".to_string(),
            is_loading: true,
            ..AppState::default()
        };

        let body = screen_lines(&state).join("\n");
        assert!(body.contains("Fetching weather..."));

        state.is_loading = false;
        state.last_error = Some("City Not Found".to_string());

        let body = screen_lines(&state).join("\n");
        assert!(!body.contains("Fetching weather..."));
        assert!(body.contains("City Not Found"));
    }

    #[test]
    fn layout_is_identical_across_themes() {
        let mut state = AppState {
            city_query: "Paris".to_string(),
            current: Some(paris_snapshot()),
            ..AppState::default()
        };

        let light = screen_lines(&state);
        state.theme = Theme::Dark;
        let dark = screen_lines(&state);

        assert_eq!(light, dark);
    }
}
