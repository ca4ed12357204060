//! jobapply - Terminal Job Application Form
//!
//! Walks an applicant through five questions, shows a confirmation screen and
//! hands the answers to the configured submission transport.

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use jobapply::application::App;
use jobapply::infrastructure::{build_transport, telemetry, AppConfig};
use jobapply::presentation::{render_ui, InputHandler};

const TICK: Duration = Duration::from_millis(100);

/// Entry point for the application form.
///
/// Loads configuration, starts logging, sets up the terminal and runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(transport = ?config.submission.transport, "starting application form");

    let mut app = App::new(build_transport(&config.submission));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal error");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// Redraws after every key press and every tick so that a finished
/// submission shows up without further input.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if InputHandler::is_quit(app, key.code, key.modifiers) {
                        return Ok(());
                    }
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }

        app.poll_submission();
    }
}
