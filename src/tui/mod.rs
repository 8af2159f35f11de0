//! Terminal User Interface module
//!
//! Full-screen journal: research form, live sentiment chart, report preview
//! and the pre-trade checklist.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{JournalApp, Tab};
pub use event::KeyAction;
pub use theme::Theme;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{debug, info};

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to normal mode
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application until the user quits
pub async fn run_tui(mut app: JournalApp) -> io::Result<()> {
    let mut terminal = init_terminal()?;
    info!("TUI started");

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore even when the loop failed so the shell is usable
    restore_terminal()?;
    info!("TUI stopped");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut JournalApp,
) -> io::Result<()> {
    while app.is_running() {
        app.tick(Instant::now());
        terminal.draw(|f| ui::render(f, app))?;

        if crossterm::event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = KeyAction::from(key);
                    debug!("Key action: {:?}", action);
                    app.handle_key(action);
                }
            }
        }

        // Let clipboard tasks run between frames
        tokio::task::yield_now().await;
    }
    Ok(())
}
