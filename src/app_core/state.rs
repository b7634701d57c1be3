//! Shared application state and the routing shell.
//!
//! This module is runtime-agnostic. Anything that needs the network is queued
//! in `pending_requests`; the runtime drains the queue after every input event
//! and feeds results back through [`AppState::apply_response`].

use crate::app_core::catalog::{SkinSearchState, WeaponSkinsState, WeaponsState};
use crate::app_core::leaderboard::LeaderboardState;
use crate::app_core::request::{FetchRequest, FetchResponse};
use crate::app_core::route::Route;
use crate::model::{Language, Region};
use crate::theme::ThemeConfig;

/// Current input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing into the weapon filter or the skin search box
    Editing,
}

/// The page mounted for the current route.
#[derive(Debug, Clone)]
pub enum View {
    Leaderboard(LeaderboardState),
    Weapons(WeaponsState),
    WeaponSkins(WeaponSkinsState),
    SkinSearch(SkinSearchState),
}

impl View {
    /// Builds a fresh view for `route` together with its initial requests.
    pub fn open(route: &Route, region: Region, language: Language) -> (View, Vec<FetchRequest>) {
        match route {
            Route::Leaderboard => {
                let mut state = LeaderboardState::new(region, language);
                let requests = state.start();
                (View::Leaderboard(state), requests)
            }
            Route::Weapons => {
                let mut state = WeaponsState::new(language);
                let requests = state.start();
                (View::Weapons(state), requests)
            }
            Route::WeaponSkins(uuid) => {
                let mut state = WeaponSkinsState::new(uuid.clone(), language);
                let requests = state.start();
                (View::WeaponSkins(state), requests)
            }
            Route::SkinSearch => {
                let mut state = SkinSearchState::new(language);
                let requests = state.start();
                (View::SkinSearch(state), requests)
            }
        }
    }

    /// Whether the view has a text field that `/` starts editing.
    pub fn has_text_input(&self) -> bool {
        matches!(self, View::Weapons(_) | View::SkinSearch(_))
    }
}

/// Application state shared by the native and web runtimes.
pub struct AppState {
    pub route: Route,
    pub view: View,
    pub input_mode: InputMode,
    /// Theme configuration
    pub theme: ThemeConfig,
    /// App version string
    pub app_version: String,
    /// API base URL, shown in the status bar
    pub api_base: String,
    /// Region a freshly opened leaderboard starts with
    pub default_region: Region,
    /// Language used by every view; `l` cycles it
    pub language: Language,
    /// Flag to quit app
    pub should_quit: bool,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Requests the runtime must execute after input handling
    pub pending_requests: Vec<FetchRequest>,
}

impl AppState {
    pub fn new(
        route: Route,
        theme: ThemeConfig,
        app_version: String,
        api_base: String,
        default_region: Region,
        language: Language,
    ) -> Self {
        let (view, requests) = View::open(&route, default_region, language);
        Self {
            route,
            view,
            input_mode: InputMode::Normal,
            theme,
            app_version,
            api_base,
            default_region,
            language,
            should_quit: false,
            show_help: false,
            pending_requests: requests,
        }
    }

    /// Mounts a fresh view for `route`. Requests of the previous view are dropped.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        tracing::debug!(from = %self.route, to = %route, "navigate");
        let (view, requests) = View::open(&route, self.default_region, self.language);
        self.route = route;
        self.view = view;
        self.input_mode = InputMode::Normal;
        self.pending_requests = requests;
    }

    /// Hands the queued requests to the runtime.
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    /// Feeds a finished fetch into the current view.
    ///
    /// Returns `false` when the response is stale (its view is gone or it was
    /// superseded); nothing changes in that case.
    pub fn apply_response(&mut self, response: FetchResponse) -> bool {
        let FetchResponse { id, outcome } = response;
        let accepted = match &mut self.view {
            View::Leaderboard(state) => {
                if !state.awaits(id) {
                    false
                } else {
                    let follow_up = state.handle_response(id, outcome);
                    self.pending_requests.extend(follow_up);
                    true
                }
            }
            View::Weapons(state) => state.handle_response(id, outcome),
            View::WeaponSkins(state) => state.handle_response(id, outcome),
            View::SkinSearch(state) => state.handle_response(id, outcome),
        };
        if !accepted {
            tracing::debug!(request = %id, "dropping stale response");
        }
        accepted
    }

    /// Switches every catalog view to the next language.
    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
        let requests = match &mut self.view {
            View::Weapons(state) => state.set_language(self.language),
            View::WeaponSkins(state) => state.set_language(self.language),
            View::SkinSearch(state) => state.set_language(self.language),
            View::Leaderboard(_) => Vec::new(),
        };
        self.pending_requests.extend(requests);
    }

    /// Current text of the editable field, if the view has one.
    pub fn input_text(&self) -> Option<&str> {
        match &self.view {
            View::Weapons(state) => Some(&state.filter),
            View::SkinSearch(state) => Some(&state.query),
            _ => None,
        }
    }

    /// Applies `edit` to the weapon filter or the search query.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        match &mut self.view {
            View::Weapons(state) => {
                let mut filter = state.filter.clone();
                edit(&mut filter);
                state.set_filter(filter);
            }
            View::SkinSearch(state) => {
                let mut query = state.query.clone();
                edit(&mut query);
                let requests = state.set_query(query);
                self.pending_requests.extend(requests);
            }
            _ => {}
        }
    }

    /// Error message of the current view, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.view {
            View::Leaderboard(state) => state.error.as_deref(),
            View::Weapons(state) => state.weapons.error.as_deref(),
            View::WeaponSkins(state) => state.error(),
            View::SkinSearch(state) => state.skins.error.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Query, Reply};
    use crate::model::{LeaderboardResponse, WeaponsResponse};
    use crate::theme::Theme;

    fn make_app(route: Route) -> AppState {
        AppState::new(
            route,
            Theme::Dracula.config(),
            "v0".to_string(),
            "http://localhost:5001/api".to_string(),
            Region::Br,
            Language::PtBr,
        )
    }

    #[test]
    fn test_new_queues_initial_requests() {
        let mut app = make_app(Route::WeaponSkins("w1".to_string()));
        let requests = app.take_requests();
        assert_eq!(requests.len(), 2);
        assert!(app.pending_requests.is_empty());

        let mut app = make_app(Route::Leaderboard);
        let requests = app.take_requests();
        assert!(matches!(requests[0].query, Query::Content { region: Region::Br, .. }));
    }

    #[test]
    fn test_navigate_drops_previous_view_responses() {
        let mut app = make_app(Route::Weapons);
        let old = app.take_requests().remove(0);

        app.navigate(Route::SkinSearch);
        assert!(matches!(app.view, View::SkinSearch(_)));
        assert_eq!(app.pending_requests.len(), 1);

        let applied = app.apply_response(FetchResponse {
            id: old.id,
            outcome: Ok(Reply::Weapons(WeaponsResponse::default())),
        });
        assert!(!applied);
    }

    #[test]
    fn test_navigate_same_route_is_noop() {
        let mut app = make_app(Route::Weapons);
        app.take_requests();
        app.navigate(Route::Weapons);
        assert!(app.pending_requests.is_empty());
    }

    #[test]
    fn test_fallback_request_is_queued_by_apply_response() {
        let mut app = make_app(Route::Leaderboard);
        let content = app.take_requests().remove(0);
        app.apply_response(FetchResponse {
            id: content.id,
            outcome: Ok(Reply::Content(
                serde_json::from_value(serde_json::json!({
                    "acts": [
                        {"id": "e1", "name": "EP", "type": "episode"},
                        {"id": "a1", "name": "ACT", "type": "act", "parentId": "e1"}
                    ]
                }))
                .unwrap(),
            )),
        });
        let page = app.take_requests().remove(0);
        assert!(app.apply_response(FetchResponse {
            id: page.id,
            outcome: Ok(Reply::Leaderboard(LeaderboardResponse::default())),
        }));

        let fallback = app.take_requests();
        assert_eq!(fallback.len(), 1);
        assert!(matches!(
            fallback[0].query,
            Query::Leaderboard { region: Region::Latam, start_index: 0, .. }
        ));
    }

    #[test]
    fn test_cycle_language_refetches_catalog() {
        let mut app = make_app(Route::Weapons);
        app.take_requests();
        app.cycle_language();
        assert_eq!(app.language, Language::EnUs);
        let requests = app.take_requests();
        assert_eq!(
            requests[0].query,
            Query::Weapons {
                language: Language::EnUs
            }
        );
    }

    #[test]
    fn test_error_surfaces_from_view() {
        let mut app = make_app(Route::SkinSearch);
        let req = app.take_requests().remove(0);
        app.apply_response(FetchResponse {
            id: req.id,
            outcome: Err(ApiError::Status(500)),
        });
        assert_eq!(app.error(), Some("HTTP 500"));
    }
}
