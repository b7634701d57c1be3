//! Client-side routes.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Leaderboard,
    Weapons,
    WeaponSkins(String),
    SkinSearch,
}

impl Route {
    /// Parses a path such as `/skins/weapon/<uuid>`. Unknown paths yield `None`.
    ///
    /// A leading `#` (browser hash), surrounding slashes and a query string are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim().trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["leaderboard"] => Some(Route::Leaderboard),
            ["skins"] => Some(Route::Weapons),
            ["skins", "search"] => Some(Route::SkinSearch),
            ["skins", "weapon", uuid] => Some(Route::WeaponSkins((*uuid).to_string())),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Leaderboard => "/leaderboard".to_string(),
            Route::Weapons => "/skins".to_string(),
            Route::WeaponSkins(uuid) => format!("/skins/weapon/{uuid}"),
            Route::SkinSearch => "/skins/search".to_string(),
        }
    }

    /// Index of the header tab this route highlights.
    pub fn tab_index(&self) -> usize {
        match self {
            Route::Leaderboard => 0,
            Route::Weapons | Route::WeaponSkins(_) => 1,
            Route::SkinSearch => 2,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Header navigation tabs, in `tab_index` order.
pub const NAV_TABS: [&str; 3] = ["Leaderboard", "Skins", "Search"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Leaderboard));
        assert_eq!(Route::parse(""), Some(Route::Leaderboard));
        assert_eq!(Route::parse("/leaderboard"), Some(Route::Leaderboard));
        assert_eq!(Route::parse("/skins/"), Some(Route::Weapons));
        assert_eq!(Route::parse("#/skins/search"), Some(Route::SkinSearch));
        assert_eq!(
            Route::parse("/skins/weapon/63e6c2b6-4a8e?x=1"),
            Some(Route::WeaponSkins("63e6c2b6-4a8e".to_string()))
        );
    }

    #[test]
    fn test_unknown_paths_rejected() {
        assert_eq!(Route::parse("/agents"), None);
        assert_eq!(Route::parse("/skins/weapon"), None);
        assert_eq!(Route::parse("/skins/weapon/a/b"), None);
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [
            Route::Leaderboard,
            Route::Weapons,
            Route::WeaponSkins("abc".to_string()),
            Route::SkinSearch,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }
}
