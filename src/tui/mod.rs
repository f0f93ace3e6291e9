//! Interactive form: two text fields, a generate action, and a result pane
//! rendered from the model's Markdown.
//!
//! The event loop multiplexes terminal input with completion results coming
//! back from spawned round trips. All form state lives in [`App`]; the loop
//! only wires events to it.

mod app;
mod markdown;
mod ui;

pub use app::{App, DisplayState, Focus, InputField};

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::error;

use crate::application::GenerateRecipeUseCase;
use crate::domain::{DomainError, Recipe};

pub async fn run(use_case: Arc<GenerateRecipeUseCase>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, use_case).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    use_case: Arc<GenerateRecipeUseCase>,
) -> Result<()> {
    let mut app = App::new();
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<(u64, Result<Recipe, DomainError>)>();

    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, &app))?;

        tokio::select! {
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some((token, request)) = app.handle_key(key) {
                            let use_case = use_case.clone();
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let result = use_case.execute(&request).await;
                                // A closed receiver means the UI is gone.
                                let _ = tx.send((token, result));
                            });
                        }
                    }
                    // Resizes and other events are handled by the redraw.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("Terminal event error: {e}");
                        break;
                    }
                    None => break,
                }
            }
            Some((token, result)) = rx.recv() => {
                app.on_completion(token, result);
            }
        }
    }

    Ok(())
}
