pub mod render;
pub mod state;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::{DashState, ViewState};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Commands the TUI can send back to the poll loop.
#[derive(Debug, Clone)]
pub enum TuiCommand {
    Refresh,
    Quit,
}

/// Run the TUI. Reads state from `state_rx`, sends commands on `cmd_tx`.
pub async fn run_tui(
    state_rx: watch::Receiver<DashState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_rx, cmd_tx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state_rx: watch::Receiver<DashState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
) -> Result<()> {
    let mut view = ViewState::default();

    loop {
        let state = state_rx.borrow_and_update().clone();
        view.clamp(state.leads.len());
        terminal.draw(|f| render::draw(f, &state, &view))?;

        // Poll for keyboard events with 100ms timeout; the next iteration
        // picks up any snapshot change regardless.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => {
                            let _ = cmd_tx.send(TuiCommand::Quit).await;
                            return Ok(());
                        }
                        KeyCode::Char('r') => {
                            let _ = cmd_tx.send(TuiCommand::Refresh).await;
                        }
                        KeyCode::Up | KeyCode::Char('k') => view.move_up(),
                        KeyCode::Down | KeyCode::Char('j') => view.move_down(state.leads.len()),
                        KeyCode::Enter => view.open_detail(&state.leads),
                        KeyCode::Esc => view.close_detail(),
                        _ => {}
                    }
                }
            }
        }
    }
}
