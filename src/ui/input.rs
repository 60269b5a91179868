//! Input handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Screen};
use crate::core::HistoryProvider;

/// Handle a crossterm event.
/// Returns true if the event was handled.
pub fn handle_input<H: HistoryProvider>(app: &mut App<H>, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Resize(width, height) => {
            app.resize(width, height);
            true
        }
        _ => false,
    }
}

/// Handle a key event.
fn handle_key<H: HistoryProvider>(app: &mut App<H>, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => app.quit(),
        KeyCode::Char('f') if ctrl => app.next_page(),
        KeyCode::Char('u') | KeyCode::Char('b') if ctrl => app.prev_page(),
        KeyCode::Esc | KeyCode::Char('q') => {
            app.cancel();
        }
        KeyCode::Char(' ') if app.screen() == Screen::Commits => app.toggle_mark(),
        KeyCode::Char('j') | KeyCode::Down => app.next_item(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_item(),
        KeyCode::PageDown => app.next_page(),
        KeyCode::PageUp => app.prev_page(),
        KeyCode::Enter => app.enter(),
        KeyCode::Char('w') if app.screen() == Screen::Diff => app.toggle_whitespace(),
        _ => return false,
    }
    true
}
