//! Full-screen host loop: owns the terminal and feeds events to the engine.

pub mod event;
pub mod menu;
pub mod theme;

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use tmenu_engine::{Area, Control, Engine};
use tmenu_types::CommandRunner;
use tracing::{debug, info};

use event::AppEvent;
use theme::Theme;

/// Run the menu until the engine asks to exit or the user presses Ctrl+C.
pub fn run<R: CommandRunner>(mut engine: Engine<R>, theme: &Theme) -> io::Result<()> {
    // Panic hook: always restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(info);
    }));

    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    engine.set_viewport(Area::new(0, 0, size.width, size.height));
    info!(topology = ?engine.topology(), "Menu started");

    let (_tx, rx) = event::spawn_event_thread(Duration::from_millis(250));
    let result = main_loop(&mut terminal, &mut engine, theme, &rx);

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    info!("Menu closed");
    result
}

fn main_loop<R: CommandRunner>(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut Engine<R>,
    theme: &Theme,
    rx: &mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    // ── Main loop ────────────────────────────────────────────────────────────
    // Draw first, then block on events.
    loop {
        terminal.draw(|frame| menu::draw(frame, &engine.current_view(), theme))?;

        let ev = match rx.recv() {
            Ok(ev) => ev,
            Err(mpsc::RecvError) => return Ok(()),
        };
        if handle_event(engine, ev) == Control::Exit {
            return Ok(());
        }
        // Drain all queued events before redrawing
        while let Ok(ev) = rx.try_recv() {
            if handle_event(engine, ev) == Control::Exit {
                return Ok(());
            }
        }
    }
}

fn handle_event<R: CommandRunner>(engine: &mut Engine<R>, ev: AppEvent) -> Control {
    match ev {
        AppEvent::Key(key) if event::is_quit(&key) => {
            debug!("Ctrl+C pressed");
            Control::Exit
        }
        AppEvent::Resize(width, height) => {
            engine.set_viewport(Area::new(0, 0, width, height));
            Control::Continue
        }
        other => match event::to_input(&other) {
            Some(input) => engine.handle_input(input),
            None => Control::Continue,
        },
    }
}
