//! Browser runtime: ratzilla input, `spawn_local` fetches and hash routing.

use crate::api;
use crate::app_core::input::{AppKeyCode, AppKeyEvent};
use crate::app_core::reducer;
use crate::app_core::request::FetchResponse;
use crate::app_core::route::Route;
use crate::app_core::state::AppState;
use crate::config::Settings;
use crate::ui;
use anyhow::Result;
use ratatui::Terminal;
use ratzilla::event::{KeyCode, KeyEvent};
use ratzilla::{DomBackend, WebRenderer};
use reqwest::Url;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

// ---------------------------------------------------------------------------
// Ratzilla → shared input type adapters
// ---------------------------------------------------------------------------

fn ratzilla_to_app_key_event(key: KeyEvent) -> Option<AppKeyEvent> {
    let key_code = match key.code {
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
        // Shift-Tab arrives as Tab with the shift flag
        KeyCode::Tab if key.shift => AppKeyCode::BackTab,
        KeyCode::Tab => AppKeyCode::Tab,
        _ => return None,
    };
    Some(AppKeyEvent {
        code: key_code,
        ctrl: key.ctrl,
        alt: key.alt,
        shift: key.shift,
        is_release: false,
    })
}

// ---------------------------------------------------------------------------
// Location hash
// ---------------------------------------------------------------------------

fn hash_route() -> Option<Route> {
    let hash = web_sys::window()?.location().hash().ok()?;
    Route::parse(&hash)
}

fn set_hash_route(route: &Route) {
    if let Some(window) = web_sys::window()
        && let Err(err) = window.location().set_hash(&route.path())
    {
        tracing::warn!(?err, "failed to update location hash");
    }
}

// ---------------------------------------------------------------------------
// Fetch dispatch
// ---------------------------------------------------------------------------

/// Starts a future for every queued request. Responses may queue follow-ups
/// (the next page, the region fallback), which are dispatched in turn.
fn dispatch_pending(app_state: &Rc<RefCell<AppState>>, base: &Rc<Url>) {
    let requests = app_state.borrow_mut().take_requests();
    for request in requests {
        let app_state = app_state.clone();
        let base = base.clone();
        spawn_local(async move {
            let outcome = api::web::execute(&base, &request.query).await;
            app_state.borrow_mut().apply_response(FetchResponse {
                id: request.id,
                outcome,
            });
            dispatch_pending(&app_state, &base);
        });
    }
}

fn handle_key_event(app_state: &Rc<RefCell<AppState>>, base: &Rc<Url>, key_event: KeyEvent) {
    let Some(event) = ratzilla_to_app_key_event(key_event) else {
        return;
    };
    let route_changed = {
        let mut app = app_state.borrow_mut();
        let before = app.route.clone();
        reducer::handle_key_event(&mut app, event);
        (app.route != before).then(|| app.route.clone())
    };
    if let Some(route) = route_changed {
        set_hash_route(&route);
    }
    dispatch_pending(app_state, base);
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run() -> Result<()> {
    let settings = Settings::from_env();
    let base = Rc::new(api::parse_base(&settings.api_base)?);
    let route = hash_route().unwrap_or_default();

    let app = Rc::new(RefCell::new(AppState::new(
        route,
        settings.theme.config(),
        format!("v{}", env!("CARGO_PKG_VERSION")),
        settings.api_base.clone(),
        settings.region,
        settings.language,
    )));
    dispatch_pending(&app, &base);

    let backend = DomBackend::new_by_id("grid").map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let event_state = app.clone();
        let base = base.clone();
        move |key_event| handle_key_event(&event_state, &base, key_event)
    });

    terminal.draw_web(move |f| {
        // Back/forward buttons change the hash without a key event.
        let hash_navigation = hash_route().filter(|route| *route != app.borrow().route);
        if let Some(route) = hash_navigation {
            app.borrow_mut().navigate(route);
            dispatch_pending(&app, &base);
        }
        ui::ui(f, &app.borrow());
    });

    Ok(())
}

