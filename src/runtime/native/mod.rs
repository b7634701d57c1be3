//! Terminal runtime: crossterm input, fetch workers and the event loop.

pub mod fetcher;

use crate::app_core::input::{AppKeyCode, AppKeyEvent};
use crate::app_core::reducer;
use crate::app_core::state::AppState;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use fetcher::Fetcher;
use ratatui::Terminal;
use std::time::Duration;

/// How long the loop waits for input before checking for finished fetches.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Crossterm → shared-reducer adapters
// ---------------------------------------------------------------------------

pub fn crossterm_to_app_key_event(
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
) -> Option<AppKeyEvent> {
    if matches!(kind, KeyEventKind::Release) {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let super_key = modifiers.contains(KeyModifiers::SUPER);

    let key_code = match code {
        KeyCode::Char(c) => AppKeyCode::Char(c),
        KeyCode::Backspace => AppKeyCode::Backspace,
        KeyCode::Enter => AppKeyCode::Enter,
        KeyCode::Esc => AppKeyCode::Esc,
        KeyCode::Up => AppKeyCode::Up,
        KeyCode::Down => AppKeyCode::Down,
        KeyCode::Left => AppKeyCode::Left,
        KeyCode::Right => AppKeyCode::Right,
        KeyCode::Home => AppKeyCode::Home,
        KeyCode::End => AppKeyCode::End,
        KeyCode::PageUp => AppKeyCode::PageUp,
        KeyCode::PageDown => AppKeyCode::PageDown,
        KeyCode::Tab => AppKeyCode::Tab,
        KeyCode::BackTab => AppKeyCode::BackTab,
        _ => return None,
    };

    Some(AppKeyEvent {
        code: key_code,
        ctrl: ctrl || super_key,
        alt,
        shift,
        is_release: false,
    })
}

/// Hands every queued request to the fetch workers.
pub fn dispatch_pending(app: &mut AppState, fetcher: &Fetcher) {
    for request in app.take_requests() {
        fetcher.spawn(request);
    }
}

pub fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    fetcher: &Fetcher,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    dispatch_pending(app, fetcher);
    terminal.draw(|f| ui::ui(f, app))?;

    loop {
        if app.should_quit {
            break;
        }

        let mut dirty = false;
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(event) =
                        crossterm_to_app_key_event(key.code, key.modifiers, key.kind)
                    {
                        reducer::handle_key_event(app, event);
                        dirty = true;
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        for response in fetcher.drain() {
            dirty |= app.apply_response(response);
        }
        dispatch_pending(app, fetcher);

        if dirty {
            terminal.draw(|f| ui::ui(f, app))?;
        }
    }
    Ok(())
}
