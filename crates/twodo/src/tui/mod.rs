/*
[INPUT]:  AppConfig, task store, weather lookup, log buffer
[OUTPUT]: Ratatui-based TUI for composing, filtering and completing tasks
[POS]:    TUI module for the twodo binary
[UPDATE]: When changing TUI layout, keybindings, or background events
*/

mod app;
mod events;
mod terminal;
mod ui;

use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event as CrosstermEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use twodo_weather::WeatherReport;

use crate::cli::open_store;
use crate::config::AppConfig;
use crate::logging::{LOG_BUFFER_CAPACITY, LogBuffer, init_tui_tracing};
use crate::weather::fetch_report;

use app::{AppState, WeatherPanel};
use events::handle_key_event;
use terminal::TerminalGuard;
use ui::draw_ui;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

enum UiEvent {
    Input(CrosstermEvent),
    Weather(WeatherReport),
}

pub async fn run_tui(config: AppConfig, log_level: &str) -> Result<()> {
    let data_dir = config.data_dir()?;
    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    let _log_guard = init_tui_tracing(log_level, &data_dir, log_buffer.clone())?;
    info!(data_dir = %data_dir.display(), "starting twodo");

    let store = open_store(&config)?;
    let mut app = AppState::new(store, log_buffer, config.tasks.default_priority);
    app.show_logs = config.ui.show_logs;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    if config.weather.enabled {
        app.weather = WeatherPanel::Loading;
        let weather_tx = event_tx.clone();
        let weather_config = config.weather.clone();
        tokio::spawn(async move {
            let report = fetch_report(&weather_config).await;
            let _ = weather_tx.send(UiEvent::Weather(report));
        });
    }

    let mut terminal = TerminalGuard::new()?;
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut tick = tokio::time::interval(Duration::from_millis(config.ui.tick_ms.max(16)));
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {}
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) => {
                        if handle_key_event(&mut app, key) {
                            should_quit = true;
                        }
                    }
                    Some(UiEvent::Input(_)) => {}
                    Some(UiEvent::Weather(report)) => {
                        debug!(summary = %report.summary(), "weather readout received");
                        app.set_weather(report);
                    }
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    info!(task_count = app.store.len(), "twodo exiting");
    Ok(())
}
