// ============================================================================
// pricetable - Demo binary
// ============================================================================
// Renders a hosted pricing table as selectable plan cards in the
// terminal. The table id and publishable key come from the command line
// or from PRICING_TABLE_ID / PRICING_TABLE_KEY; missing inputs simply
// show the component's validation error view.
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use pricetable::app::App;
use pricetable::hook::PricingTableOptions;
use pricetable::ui::{
    self,
    events::{
        is_next_card_event, is_previous_card_event, is_quit_event, is_select_event,
        is_toggle_billing_event, Event, EventHandler,
    },
    PricingTableProps, PricingTableView,
};

// ============================================================================
// Logging
// ============================================================================

/// Initializes file logging with daily rotation.
///
/// A TUI owns the terminal, so logs go to
/// `<data dir>/pricetable/logs/pricetable.log` (falling back to ./logs).
/// Level control via RUST_LOG, ex: `RUST_LOG=pricetable=trace`.
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("pricetable/logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));
    std::fs::create_dir_all(&log_dir).context("failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "pricetable.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricetable=debug,info".into()),
        )
        .init();

    info!(?log_dir, "logging initialized");
    Ok(())
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("Warning: failed to initialize logging: {e}");
    });

    let options = options_from_environment();
    info!(table = %options.pricing_table_id, "mounting pricing table");

    let props = PricingTableProps {
        on_select_price: Some(Box::new(|price_id, item| {
            info!(price = %price_id, plan = %item.name, "price selected");
        })),
        ..Default::default()
    };
    let view = PricingTableView::new(options, props);
    let app = App::new(view);

    debug!("setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();
    let result = run(&mut terminal, app, &events);

    debug!("restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(()) => info!("application exited normally"),
        Err(e) => error!(error = ?e, "application exited with error"),
    }

    result
}

/// Table id and key from argv, falling back to the environment. Either
/// may end up empty; the component then renders its validation error.
fn options_from_environment() -> PricingTableOptions {
    let mut args = std::env::args().skip(1);
    let pricing_table_id = args
        .next()
        .or_else(|| std::env::var("PRICING_TABLE_ID").ok())
        .unwrap_or_default();
    let publishable_key = args
        .next()
        .or_else(|| std::env::var("PRICING_TABLE_KEY").ok())
        .unwrap_or_default();

    PricingTableOptions {
        pricing_table_id,
        publishable_key,
    }
}

// ============================================================================
// Event loop
// ============================================================================

/// Render → input → update, until the app stops running.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| ui::render(frame, &app))?;

        match events.next() {
            Ok(event) => handle_event(&mut app, event),
            Err(e) => {
                error!(error = ?e, "failed to read terminal event");
            }
        }

        app.tick();
    }

    Ok(())
}

/// Dispatches one event against the app state.
fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("user confirmed quit");
                app.quit();
            } else {
                app.request_quit();
            }
        }

        Event::Key(_) if is_previous_card_event(&event) => {
            app.cancel_quit();
            app.previous_card();
        }

        Event::Key(_) if is_next_card_event(&event) => {
            app.cancel_quit();
            app.next_card();
        }

        Event::Key(_) if is_toggle_billing_event(&event) => {
            app.cancel_quit();
            app.toggle_billing();
            debug!(annual = app.view().props().annual, "billing mode toggled");
        }

        Event::Key(_) if is_select_event(&event) => {
            app.cancel_quit();
            app.select_plan();
        }

        // Any other key disarms a pending quit confirmation.
        Event::Key(_) => {
            app.cancel_quit();
        }

        Event::Tick => {}
    }
}

// ============================================================================
// Terminal setup / restore
// ============================================================================

/// Raw mode + alternate screen. Must be paired with
/// [`restore_terminal`] on every exit path.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Puts the terminal back the way we found it.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
