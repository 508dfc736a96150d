// ============================================================================
// Event handling
// ============================================================================
// Polls the terminal for keyboard input, folding quiet periods into Tick
// events so the render loop keeps turning.
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// Key pressed
    Key(KeyEvent),

    /// Regular tick (no input within the poll window)
    Tick,
}

/// Polls the terminal for the next event.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Reads the next event, waiting at most 250ms.
    ///
    /// Key releases are folded into Tick: some platforms report Press and
    /// Release separately and only Press should act.
    pub fn next(&self) -> Result<Event> {
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Key predicates
// ============================================================================

/// 'q' : quit (two-step confirmation)
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Escape
pub fn is_escape_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Esc)
    } else {
        false
    }
}

/// Enter : select the highlighted plan
pub fn is_select_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Enter)
    } else {
        false
    }
}

/// Left arrow or 'h' (vim) : previous card
pub fn is_previous_card_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(
            key.code,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H')
        )
    } else {
        false
    }
}

/// Right arrow or 'l' (vim) : next card
pub fn is_next_card_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(
            key.code,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L')
        )
    } else {
        false
    }
}

/// 'b' : toggle between monthly and annual billing
pub fn is_toggle_billing_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('b') | KeyCode::Char('B'))
    } else {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
