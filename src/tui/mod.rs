//! Terminal UI module for modelbook.
//!
//! The event loop runs asynchronously using [`tokio::select!`] with a fixed
//! render tick and crossterm's async [`EventStream`](crossterm::event::EventStream).
//! Every editor operation runs synchronously on this one task.

mod app;
mod keys;
mod ui;

use app::App;
use ui::draw;

use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::interval;

use crate::config::ConfigStore;
use crate::constants::TICK_DURATION;
use crate::editor::Editor;
use crate::settings::Settings;

/// Launches the TUI event loop.
///
/// Enters raw mode and the alternate screen, loads the document, then loops:
/// - Expires the status line and redraws each tick
/// - Handles crossterm key events
///
/// The terminal is restored on exit, including when the loop fails.
pub async fn run_tui(settings: Settings) -> Result<()> {
    let editor = Editor::load(
        ConfigStore::new(&settings.config_path),
        settings.save_policy,
    );
    let mut app = App::new(editor);

    // --- Terminal setup ---
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            let _ = io::stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(err);
        }
    };

    let result = event_loop(&mut terminal, &mut app).await;

    // --- Terminal teardown ---
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

/// Enters the alternate screen and builds the terminal. Raw mode must
/// already be on; the caller undoes it if this fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    io::stdout()
        .execute(EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    let terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")?;
    Ok(terminal)
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = interval(TICK_DURATION);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                app.tick(Instant::now());
                terminal.draw(|f| draw(f, app))?;
            }
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => {
                        if !keys::handle_key(app, key) {
                            break;
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        terminal.draw(|f| draw(f, app))?;
                    }
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => break,
                    _ => {} // mouse, focus and paste events are ignored
                }
            }
        }
    }

    tracing::info!(dirty = app.editor.is_dirty(), "editor closed");
    Ok(())
}
