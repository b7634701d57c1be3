//! Weapon and skin catalog views.

use crate::api::{ApiError, Query, Reply};
use crate::app_core::request::{FetchRequest, Remote, RequestId};
use crate::model::{Language, Skin, SkinsResponse, Weapon, WeaponsResponse};

/// Weapons sorted by display name (case-insensitive), keeping those whose name
/// or category contains the trimmed, case-insensitive `filter`.
pub fn filter_weapons<'a>(weapons: &'a [Weapon], filter: &str) -> Vec<&'a Weapon> {
    let needle = filter.trim().to_lowercase();
    let mut visible: Vec<&Weapon> = weapons
        .iter()
        .filter(|w| {
            needle.is_empty()
                || w.display_name.to_lowercase().contains(&needle)
                || w.category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect();
    visible.sort_by_key(|w| w.display_name.to_lowercase());
    visible
}

fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

fn step_selection(selected: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (selected as i64 + delta as i64).clamp(0, len as i64 - 1) as usize
}

/// `/skins`: the weapon list with a local filter.
#[derive(Debug, Clone)]
pub struct WeaponsState {
    pub language: Language,
    pub filter: String,
    pub weapons: Remote<WeaponsResponse>,
    pub selected: usize,
}

impl WeaponsState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            filter: String::new(),
            weapons: Remote::default(),
            selected: 0,
        }
    }

    pub fn start(&mut self) -> Vec<FetchRequest> {
        vec![self.weapons.begin(Query::Weapons {
            language: self.language,
        })]
    }

    pub fn set_language(&mut self, language: Language) -> Vec<FetchRequest> {
        if language == self.language {
            return Vec::new();
        }
        self.language = language;
        self.start()
    }

    pub fn visible(&self) -> Vec<&Weapon> {
        self.weapons
            .data
            .as_ref()
            .map(|data| filter_weapons(&data.weapons, &self.filter))
            .unwrap_or_default()
    }

    pub fn selected_weapon(&self) -> Option<&Weapon> {
        self.visible().get(self.selected).copied()
    }

    /// Replaces the filter text. Filtering is local and never issues a request.
    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.selected = clamp_selection(self.selected, self.visible().len());
    }

    pub fn move_selection(&mut self, delta: i32) {
        self.selected = step_selection(self.selected, delta, self.visible().len());
    }

    pub fn handle_response(&mut self, id: RequestId, outcome: Result<Reply, ApiError>) -> bool {
        let accepted = self.weapons.resolve(id, outcome);
        if accepted {
            self.selected = clamp_selection(self.selected, self.visible().len());
        }
        accepted
    }
}

/// `/skins/weapon/{uuid}`: skins of one weapon, titled by the weapon's name.
#[derive(Debug, Clone)]
pub struct WeaponSkinsState {
    pub weapon_uuid: String,
    pub language: Language,
    pub weapons: Remote<WeaponsResponse>,
    pub skins: Remote<SkinsResponse>,
    pub selected: usize,
}

impl WeaponSkinsState {
    pub fn new(weapon_uuid: String, language: Language) -> Self {
        Self {
            weapon_uuid,
            language,
            weapons: Remote::default(),
            skins: Remote::default(),
            selected: 0,
        }
    }

    /// Fetches the weapon list (for the title) and the skins together.
    pub fn start(&mut self) -> Vec<FetchRequest> {
        vec![
            self.weapons.begin(Query::Weapons {
                language: self.language,
            }),
            self.skins.begin(Query::WeaponSkins {
                weapon_uuid: self.weapon_uuid.clone(),
                language: self.language,
            }),
        ]
    }

    pub fn set_language(&mut self, language: Language) -> Vec<FetchRequest> {
        if language == self.language {
            return Vec::new();
        }
        self.language = language;
        self.start()
    }

    pub fn title(&self) -> &str {
        self.weapons
            .data
            .as_ref()
            .and_then(|data| data.weapons.iter().find(|w| w.uuid == self.weapon_uuid))
            .map(|w| w.display_name.as_str())
            .unwrap_or("Weapon")
    }

    pub fn skins(&self) -> &[Skin] {
        self.skins
            .data
            .as_ref()
            .map(|data| data.skins.as_slice())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        self.skins.error.as_deref().or(self.weapons.error.as_deref())
    }

    pub fn is_loading(&self) -> bool {
        self.weapons.is_loading() || self.skins.is_loading()
    }

    pub fn move_selection(&mut self, delta: i32) {
        self.selected = step_selection(self.selected, delta, self.skins().len());
    }

    pub fn handle_response(&mut self, id: RequestId, outcome: Result<Reply, ApiError>) -> bool {
        if self.weapons.is_waiting_for(id) {
            return self.weapons.resolve(id, outcome);
        }
        let accepted = self.skins.resolve(id, outcome);
        if accepted {
            self.selected = clamp_selection(self.selected, self.skins().len());
        }
        accepted
    }
}

/// `/skins/search`: free-text skin search, refetched whenever the query changes.
#[derive(Debug, Clone)]
pub struct SkinSearchState {
    pub language: Language,
    pub query: String,
    pub skins: Remote<SkinsResponse>,
    pub selected: usize,
}

impl SkinSearchState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            query: String::new(),
            skins: Remote::default(),
            selected: 0,
        }
    }

    pub fn start(&mut self) -> Vec<FetchRequest> {
        vec![self.skins.begin(Query::SearchSkins {
            language: self.language,
            q: Some(self.query.clone()),
            weapon_uuid: None,
        })]
    }

    pub fn set_language(&mut self, language: Language) -> Vec<FetchRequest> {
        if language == self.language {
            return Vec::new();
        }
        self.language = language;
        self.start()
    }

    /// Replaces the query and refetches when its trimmed form changed.
    pub fn set_query(&mut self, query: String) -> Vec<FetchRequest> {
        let changed = query.trim() != self.query.trim();
        self.query = query;
        if !changed {
            return Vec::new();
        }
        self.selected = 0;
        self.start()
    }

    pub fn skins(&self) -> &[Skin] {
        self.skins
            .data
            .as_ref()
            .map(|data| data.skins.as_slice())
            .unwrap_or_default()
    }

    pub fn move_selection(&mut self, delta: i32) {
        self.selected = step_selection(self.selected, delta, self.skins().len());
    }

    pub fn handle_response(&mut self, id: RequestId, outcome: Result<Reply, ApiError>) -> bool {
        let accepted = self.skins.resolve(id, outcome);
        if accepted {
            self.selected = clamp_selection(self.selected, self.skins().len());
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weapons_reply() -> Reply {
        Reply::Weapons(
            serde_json::from_value(json!({
                "weapons": [
                    {"uuid": "w2", "displayName": "Vandal", "category": "EEquippableCategory::Rifle"},
                    {"uuid": "w1", "displayName": "Spectre", "category": "EEquippableCategory::SMG"},
                    {"uuid": "w3", "displayName": "bulldog", "category": "EEquippableCategory::Rifle"}
                ]
            }))
            .unwrap(),
        )
    }

    fn skins_reply(names: &[&str]) -> Reply {
        let skins: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"uuid": format!("s{i}"), "displayName": name}))
            .collect();
        Reply::Skins(serde_json::from_value(json!({ "skins": skins })).unwrap())
    }

    fn names(weapons: &[&Weapon]) -> Vec<String> {
        weapons.iter().map(|w| w.display_name.clone()).collect()
    }

    #[test]
    fn test_filter_example() {
        let weapons: Vec<Weapon> = serde_json::from_value(json!([
            {"uuid": "1", "displayName": "Vandal"},
            {"uuid": "2", "displayName": "Spectre"}
        ]))
        .unwrap();
        assert_eq!(names(&filter_weapons(&weapons, "vand")), vec!["Vandal"]);
    }

    #[test]
    fn test_weapons_sorted_and_filtered_by_category() {
        let mut state = WeaponsState::new(Language::PtBr);
        let req = state.start().remove(0);
        assert!(state.handle_response(req.id, Ok(weapons_reply())));

        assert_eq!(names(&state.visible()), vec!["bulldog", "Spectre", "Vandal"]);

        state.set_filter("  RIFLE ".to_string());
        assert_eq!(names(&state.visible()), vec!["bulldog", "Vandal"]);

        state.set_filter("nothing".to_string());
        assert!(state.visible().is_empty());
        assert_eq!(state.selected, 0);
        assert!(state.selected_weapon().is_none());
    }

    #[test]
    fn test_weapons_language_change_refetches() {
        let mut state = WeaponsState::new(Language::PtBr);
        let first = state.start().remove(0);
        assert!(state.set_language(Language::PtBr).is_empty());

        let second = state.set_language(Language::EnUs).remove(0);
        assert_eq!(
            second.query,
            Query::Weapons {
                language: Language::EnUs
            }
        );
        assert!(!state.handle_response(first.id, Ok(weapons_reply())));
        assert!(state.weapons.data.is_none());
    }

    #[test]
    fn test_selection_follows_visible_list() {
        let mut state = WeaponsState::new(Language::PtBr);
        let req = state.start().remove(0);
        state.handle_response(req.id, Ok(weapons_reply()));

        state.move_selection(5);
        assert_eq!(state.selected, 2);
        assert_eq!(state.selected_weapon().unwrap().uuid, "w2");

        state.set_filter("spec".to_string());
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_weapon().unwrap().uuid, "w1");
    }

    #[test]
    fn test_weapon_skins_fetches_title_and_skins() {
        let mut state = WeaponSkinsState::new("w1".to_string(), Language::EsEs);
        let requests = state.start();
        assert_eq!(requests.len(), 2);
        assert_eq!(state.title(), "Weapon");
        assert!(state.is_loading());

        state.handle_response(requests[1].id, Ok(skins_reply(&["Prime Spectre", "Ion Spectre"])));
        assert_eq!(state.title(), "Weapon");
        assert_eq!(state.skins().len(), 2);

        state.handle_response(requests[0].id, Ok(weapons_reply()));
        assert_eq!(state.title(), "Spectre");
        assert!(!state.is_loading());
    }

    #[test]
    fn test_weapon_skins_unknown_weapon_keeps_default_title() {
        let mut state = WeaponSkinsState::new("missing".to_string(), Language::PtBr);
        let requests = state.start();
        state.handle_response(requests[0].id, Ok(weapons_reply()));
        state.handle_response(requests[1].id, Err(ApiError::Status(404)));

        assert_eq!(state.title(), "Weapon");
        assert_eq!(state.error(), Some("HTTP 404"));
    }

    #[test]
    fn test_search_refetches_on_query_change() {
        let mut state = SkinSearchState::new(Language::PtBr);
        let first = state.start().remove(0);
        assert_eq!(
            first.query,
            Query::SearchSkins {
                language: Language::PtBr,
                q: Some(String::new()),
                weapon_uuid: None
            }
        );

        let second = state.set_query("prime".to_string()).remove(0);
        assert!(state.set_query("prime ".to_string()).is_empty());

        assert!(!state.handle_response(first.id, Ok(skins_reply(&["Old"]))));
        assert!(state.skins().is_empty());

        assert!(state.handle_response(second.id, Ok(skins_reply(&["Prime Vandal"]))));
        assert_eq!(state.skins()[0].display_name, "Prime Vandal");
    }

    #[test]
    fn test_search_error_keeps_results() {
        let mut state = SkinSearchState::new(Language::PtBr);
        let req = state.start().remove(0);
        state.handle_response(req.id, Ok(skins_reply(&["A", "B"])));

        let req = state.set_query("x".to_string()).remove(0);
        state.handle_response(req.id, Err(ApiError::Transport("timed out".to_string())));
        assert_eq!(state.skins().len(), 2);
        assert!(state.skins.error.is_some());
    }
}
