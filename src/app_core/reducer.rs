//! Shared event reducer: key handlers for every view.
//!
//! Both the native and web runtimes call [`handle_key_event`] after converting
//! their platform-specific events to [`AppKeyEvent`].

use crate::app_core::input::{AppKeyCode, AppKeyEvent};
use crate::app_core::leaderboard::LeaderboardAction;
use crate::app_core::route::Route;
use crate::app_core::state::{AppState, InputMode, View};

/// Rows moved by PageUp / PageDown in tables and lists.
pub const PAGE_ROWS: i32 = 10;

/// Handle a runtime-agnostic key event, mutating `app` in place.
///
/// May queue requests in `app.pending_requests`; the runtime is responsible
/// for executing them after this function returns.
pub fn handle_key_event(app: &mut AppState, event: AppKeyEvent) {
    if event.is_release {
        return;
    }

    let code = event.code;
    let ctrl = event.ctrl;

    if ctrl && code == AppKeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.show_help {
        if matches!(code, AppKeyCode::Char('?') | AppKeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Editing => handle_editing_key(app, code, ctrl),
        InputMode::Normal => handle_normal_key(app, event),
    }
}

fn handle_editing_key(app: &mut AppState, code: AppKeyCode, ctrl: bool) {
    match code {
        AppKeyCode::Enter | AppKeyCode::Esc => app.input_mode = InputMode::Normal,
        AppKeyCode::Char('u') if ctrl => app.edit_input(String::clear),
        AppKeyCode::Backspace => app.edit_input(|text| {
            text.pop();
        }),
        AppKeyCode::Char(c) if !ctrl => app.edit_input(|text| text.push(c)),
        _ => {}
    }
}

fn handle_normal_key(app: &mut AppState, event: AppKeyEvent) {
    let code = event.code;
    match code {
        AppKeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        AppKeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        AppKeyCode::Char('1') => {
            app.navigate(Route::Leaderboard);
            return;
        }
        AppKeyCode::Char('2') => {
            app.navigate(Route::Weapons);
            return;
        }
        AppKeyCode::Char('3') => {
            app.navigate(Route::SkinSearch);
            return;
        }
        AppKeyCode::Char('/') if app.view.has_text_input() => {
            app.input_mode = InputMode::Editing;
            return;
        }
        AppKeyCode::Char('l') if !matches!(app.view, View::Leaderboard(_)) => {
            app.cycle_language();
            return;
        }
        _ => {}
    }

    let mut open_route = None;
    let requests = match &mut app.view {
        View::Leaderboard(state) => match code {
            AppKeyCode::Tab if event.shift => {
                state.focus = state.focus.prev();
                Vec::new()
            }
            AppKeyCode::Tab => {
                state.focus = state.focus.next();
                Vec::new()
            }
            AppKeyCode::BackTab => {
                state.focus = state.focus.prev();
                Vec::new()
            }
            AppKeyCode::Left => state.step_focused(-1),
            AppKeyCode::Right => state.step_focused(1),
            AppKeyCode::Up => {
                state.move_row(-1);
                Vec::new()
            }
            AppKeyCode::Down => {
                state.move_row(1);
                Vec::new()
            }
            AppKeyCode::PageUp => {
                state.move_row(-PAGE_ROWS);
                Vec::new()
            }
            AppKeyCode::PageDown => {
                state.move_row(PAGE_ROWS);
                Vec::new()
            }
            AppKeyCode::Home => {
                state.selected_row = 0;
                Vec::new()
            }
            AppKeyCode::End => {
                state.selected_row = state.players.len().saturating_sub(1);
                Vec::new()
            }
            AppKeyCode::Char('m') | AppKeyCode::Enter => {
                state.dispatch(LeaderboardAction::LoadMore)
            }
            AppKeyCode::Char('r') => state.dispatch(LeaderboardAction::Reload),
            _ => Vec::new(),
        },
        View::Weapons(state) => {
            match code {
                AppKeyCode::Up => state.move_selection(-1),
                AppKeyCode::Down => state.move_selection(1),
                AppKeyCode::PageUp => state.move_selection(-PAGE_ROWS),
                AppKeyCode::PageDown => state.move_selection(PAGE_ROWS),
                AppKeyCode::Esc if !state.filter.is_empty() => state.set_filter(String::new()),
                AppKeyCode::Enter => {
                    open_route = state
                        .selected_weapon()
                        .map(|w| Route::WeaponSkins(w.uuid.clone()));
                }
                _ => {}
            }
            Vec::new()
        }
        View::WeaponSkins(state) => {
            match code {
                AppKeyCode::Up => state.move_selection(-1),
                AppKeyCode::Down => state.move_selection(1),
                AppKeyCode::PageUp => state.move_selection(-PAGE_ROWS),
                AppKeyCode::PageDown => state.move_selection(PAGE_ROWS),
                AppKeyCode::Esc | AppKeyCode::Backspace => open_route = Some(Route::Weapons),
                _ => {}
            }
            Vec::new()
        }
        View::SkinSearch(state) => {
            match code {
                AppKeyCode::Up => state.move_selection(-1),
                AppKeyCode::Down => state.move_selection(1),
                AppKeyCode::PageUp => state.move_selection(-PAGE_ROWS),
                AppKeyCode::PageDown => state.move_selection(PAGE_ROWS),
                _ => {}
            }
            Vec::new()
        }
    };
    app.pending_requests.extend(requests);

    if let Some(route) = open_route {
        app.navigate(route);
    }
}
