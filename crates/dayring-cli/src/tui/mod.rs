//! Interactive TUI dashboard for browsing and toggling plans.

pub mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use dayring_store::PlanStore;

use app::App;

/// Launch the interactive TUI dashboard.
pub fn run_dashboard(store: PlanStore) -> Result<()> {
    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        // Render.
        terminal.draw(|f| ui::render(f, app))?;

        // The store is in-process, so there is nothing to poll for between
        // keypresses; the tick only keeps the clock-derived columns fresh.
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Clear status message on any keypress.
                app.status_message = None;

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app.navigate_back();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    KeyCode::Enter => {
                        app.navigate_enter();
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        app.move_down();
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        app.move_up();
                    }
                    KeyCode::Tab => {
                        app.cycle_horizon();
                    }
                    KeyCode::Char(' ') | KeyCode::Char('x') => {
                        app.toggle_selected();
                    }
                    KeyCode::Char('d') => {
                        app.delete_selected();
                    }
                    KeyCode::Char('?') => {
                        app.open_help();
                    }
                    _ => {}
                }
            }
        } else {
            app.refresh();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
