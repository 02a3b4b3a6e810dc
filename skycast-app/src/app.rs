//! The event loop: keystrokes become actions, actions run through the
//! reducer, and effects spawn work that reports back over the action
//! channel. State lives on this loop alone.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use futures_util::StreamExt;
use skycast_core::{
    Action, AppState, Config, ConfiguredLocation, DEFAULT_QUIET_WINDOW, Debouncer, Effect,
    FALLBACK_CITY, FilePreferences, LocationSource, OpenWeather, PreferenceStore, Theme,
    WeatherApi, fetch_weather, update,
};
use std::io::stdout;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::cli::Cli;
use crate::ui;

pub async fn run(args: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let api_key = config.api_key()?;

    let api: Arc<dyn WeatherApi> = Arc::new(OpenWeather::new(api_key));
    let location: Arc<dyn LocationSource> =
        Arc::new(ConfiguredLocation::new(config.coordinates()));
    let prefs: Arc<dyn PreferenceStore> = Arc::new(FilePreferences::open_default()?);

    let mut state = AppState::default();
    if args.dark {
        state.theme = Theme::Dark;
    }

    let (actions_tx, mut actions_rx) = mpsc::unbounded_channel();
    // One debouncer per app lifetime, so rapid keystrokes share a timer.
    let debouncer = Debouncer::new(DEFAULT_QUIET_WINDOW, actions_tx.clone());

    let stored_city = args.city.clone().or_else(|| prefs.last_city());
    let _ = actions_tx.send(Action::Bootstrap { stored_city });

    terminal::enable_raw_mode().context("Failed to enable raw terminal mode")?;
    execute!(stdout(), EnterAlternateScreen)?;

    let result = event_loop(
        &mut state,
        &api,
        &location,
        &prefs,
        &debouncer,
        &actions_tx,
        &mut actions_rx,
    )
    .await;

    let _ = execute!(stdout(), LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

async fn event_loop(
    state: &mut AppState,
    api: &Arc<dyn WeatherApi>,
    location: &Arc<dyn LocationSource>,
    prefs: &Arc<dyn PreferenceStore>,
    debouncer: &Debouncer<Action>,
    actions_tx: &mpsc::UnboundedSender<Action>,
    actions_rx: &mut mpsc::UnboundedReceiver<Action>,
) -> Result<()> {
    let mut events = EventStream::new();
    ui::draw(state)?;

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key(state, key, debouncer, actions_tx) {
                            break;
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => ui::draw(state)?,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => tracing::warn!(%err, "Terminal event error"),
                    None => break,
                }
            }
            Some(action) = actions_rx.recv() => {
                for effect in update(state, action) {
                    run_effect(effect, api, location, prefs, actions_tx);
                }
                ui::draw(state)?;
            }
        }
    }

    Ok(())
}

/// Translate a key press into actions. Returns `true` to quit.
fn handle_key(
    state: &AppState,
    key: KeyEvent,
    debouncer: &Debouncer<Action>,
    actions_tx: &mpsc::UnboundedSender<Action>,
) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let _ = actions_tx.send(Action::ToggleTheme);
        }
        KeyCode::Enter => {
            let _ = actions_tx.send(Action::SubmitCity(state.city_query.clone()));
        }
        KeyCode::Backspace => {
            let mut text = state.city_query.clone();
            text.pop();
            edit_city(text, debouncer, actions_tx);
        }
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            let mut text = state.city_query.clone();
            text.push(c);
            edit_city(text, debouncer, actions_tx);
        }
        _ => {}
    }

    false
}

/// Every edit updates the input immediately and (re)arms the debounced
/// fetch with the latest text.
fn edit_city(
    text: String,
    debouncer: &Debouncer<Action>,
    actions_tx: &mpsc::UnboundedSender<Action>,
) {
    let _ = actions_tx.send(Action::InputChanged(text.clone()));
    debouncer.call(Action::SubmitCity(text));
}

fn run_effect(
    effect: Effect,
    api: &Arc<dyn WeatherApi>,
    location: &Arc<dyn LocationSource>,
    prefs: &Arc<dyn PreferenceStore>,
    actions_tx: &mpsc::UnboundedSender<Action>,
) {
    match effect {
        Effect::FetchWeather { city, seq } => {
            let api = Arc::clone(api);
            let tx = actions_tx.clone();
            tokio::spawn(async move {
                match fetch_weather(api.as_ref(), &city).await {
                    Ok((weather, forecast)) => {
                        let _ = tx.send(Action::FetchSucceeded {
                            seq,
                            weather,
                            forecast,
                        });
                    }
                    Err(err) => {
                        tracing::info!(%city, %err, "Weather fetch failed");
                        let _ = tx.send(Action::FetchFailed {
                            seq,
                            message: err.to_string(),
                        });
                    }
                }
            });
        }

        Effect::PersistCity(city) => {
            if let Err(err) = prefs.remember_city(&city) {
                tracing::warn!(%err, "Failed to persist last city");
            }
        }

        Effect::DetectLocation => {
            let api = Arc::clone(api);
            let location = Arc::clone(location);
            let tx = actions_tx.clone();
            tokio::spawn(async move {
                let coords = match location.current_position().await {
                    Ok(coords) => coords,
                    Err(err) => {
                        // Same outcome as a denied browser prompt: stay
                        // idle, nothing shown to the user.
                        tracing::info!(%err, "Skipping city auto-detection");
                        return;
                    }
                };

                let city = match api.reverse_geocode(coords).await {
                    Ok(Some(name)) => name,
                    Ok(None) => FALLBACK_CITY.to_string(),
                    Err(err) => {
                        tracing::warn!(%err, "Reverse geocoding failed");
                        FALLBACK_CITY.to_string()
                    }
                };

                let _ = tx.send(Action::CityResolved(city));
            });
        }
    }
}
