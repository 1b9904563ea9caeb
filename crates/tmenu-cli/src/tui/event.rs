//! Event system: crossterm polling on a background thread.

use ratatui::crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEventKind,
};
use std::sync::mpsc;
use std::time::Duration;
use tmenu_engine::{InputEvent, Key};

// ── AppEvent ────────────────────────────────────────────────────────────────

/// Unified application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A crossterm key press event (filtered to Press only).
    Key(KeyEvent),
    /// Left mouse button pressed at (column, row).
    Click { column: u16, row: u16 },
    /// Terminal resized to (width, height).
    Resize(u16, u16),
    /// No input within the poll interval.
    Tick,
}

/// Spawn the crossterm polling thread.
pub fn spawn_event_thread(
    tick_rate: Duration,
) -> (mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    let poll_tx = tx.clone();

    std::thread::spawn(move || loop {
        if event::poll(tick_rate).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                let sent = match ev {
                    // Only forward Press events; Windows also reports Release
                    // and Repeat, which would double every key.
                    CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        poll_tx.send(AppEvent::Key(key))
                    }
                    CtEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                        poll_tx.send(AppEvent::Click {
                            column: mouse.column,
                            row: mouse.row,
                        })
                    }
                    CtEvent::Resize(w, h) => poll_tx.send(AppEvent::Resize(w, h)),
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        } else if poll_tx.send(AppEvent::Tick).is_err() {
            break;
        }
    });

    (tx, rx)
}

/// Ctrl+C quits regardless of what the menu is showing.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Translate a crossterm key into the engine's key set.
pub fn to_engine_key(key: &KeyEvent) -> Key {
    match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab => Key::Tab,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// The engine input for an app event, if it has one.
pub fn to_input(ev: &AppEvent) -> Option<InputEvent> {
    match ev {
        AppEvent::Key(key) => Some(InputEvent::Key(to_engine_key(key))),
        AppEvent::Click { column, row } => Some(InputEvent::Click {
            column: *column,
            row: *row,
        }),
        AppEvent::Resize(..) | AppEvent::Tick => None,
    }
}
