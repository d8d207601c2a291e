//! Cropdeck dashboard entry point.

use cropdeck_tui::api_client::RestClient;
use cropdeck_tui::config::DashboardConfig;
use cropdeck_tui::dispatch::Dispatcher;
use cropdeck_tui::error::TuiError;
use cropdeck_tui::events::TuiEvent;
use cropdeck_tui::keys::map_key;
use cropdeck_tui::logging;
use cropdeck_tui::notifications::NotificationLevel;
use cropdeck_tui::persistence;
use cropdeck_tui::state::App;
use cropdeck_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = DashboardConfig::load()?;
    logging::init(&config.log_path)?;
    tracing::info!(api_base_url = %config.api_base_url, "starting dashboard");

    let api = RestClient::new(&config)?;
    let mut app = App::new(config);
    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => app.restore(state),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable saved state");
            app.notify(NotificationLevel::Warning, "Saved preferences could not be read");
        }
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    let dispatcher = Dispatcher::new(Arc::new(api), event_tx.clone());

    spawn_input_reader(event_tx.clone());
    dispatcher.dispatch_all(app.mount());

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    while !app.should_quit {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(),
            Some(event) = event_rx.recv() => handle_event(&mut app, &dispatcher, event),
        }
    }

    if let Err(err) = persistence::save(&app.config.persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "failed to save preferences");
    }
    tracing::info!("dashboard closed");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

fn handle_event(app: &mut App, dispatcher: &Dispatcher, event: TuiEvent) {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(key, app.input_mode()) {
                dispatcher.dispatch_all(app.handle_action(action));
            }
        }
        TuiEvent::Fetched(result) => app.handle_fetch(result),
        TuiEvent::Submitted(result) => dispatcher.dispatch_all(app.handle_submit(result)),
        TuiEvent::Resize { .. } => {}
    }
}
