//! Wire types returned by the stats API, shared by both runtimes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Leaderboard shard queried by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Br,
    Na,
    Eu,
    Ap,
    Kr,
    Latam,
}

impl Region {
    /// Selector order shown to the user.
    pub const ALL: [Region; 6] = [
        Region::Br,
        Region::Na,
        Region::Eu,
        Region::Ap,
        Region::Kr,
        Region::Latam,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Br => "br",
            Self::Na => "na",
            Self::Eu => "eu",
            Self::Ap => "ap",
            Self::Kr => "kr",
            Self::Latam => "latam",
        }
    }

    pub fn label(self) -> String {
        self.as_str().to_uppercase()
    }

    /// Region queried when this region's first leaderboard page comes back empty.
    pub const fn fallback(self) -> Option<Region> {
        match self {
            Self::Br => Some(Self::Latam),
            _ => None,
        }
    }

    /// Cycles through [`Region::ALL`]; `step` is +1 or -1.
    pub fn cycle(self, step: i32) -> Region {
        let len = Self::ALL.len() as i32;
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0) as i32;
        Self::ALL[(idx + step).rem_euclid(len) as usize]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == wanted)
            .ok_or_else(|| format!("unknown region '{s}' (expected br, na, eu, ap, kr or latam)"))
    }
}

/// Locale sent as `locale` to `/content` and as `language` to the catalog endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    PtBr,
    EnUs,
    EsEs,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::PtBr, Language::EnUs, Language::EsEs];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
            Self::EsEs => "es-ES",
        }
    }

    pub fn next(self) -> Language {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown language '{s}' (expected pt-BR, en-US or es-ES)"))
    }
}

/// Kind of a `/content` entry, resolved from its free-form `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Episode,
    Act,
    Other,
}

/// Explicit JSON `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One row of the flat `/content` list. Episodes and acts share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    /// Owning episode. Filled in by parent inference when the API omits it.
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl ContentEntry {
    pub fn kind(&self) -> EntryKind {
        match self.entry_type.as_deref().map(str::to_lowercase).as_deref() {
            Some("episode") => EntryKind::Episode,
            Some("act") => EntryKind::Act,
            _ => EntryKind::Other,
        }
    }

    /// Explicit parent reference; an empty string counts as missing.
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub acts: Vec<ContentEntry>,
}

/// A ranked player as returned by `/leaderboard`. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub puuid: Option<String>,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
    pub leaderboard_rank: Option<u64>,
    pub ranked_rating: Option<u64>,
    pub number_of_wins: Option<u64>,
    pub competitive_tier: Option<u64>,
}

impl Player {
    /// `Name#TAG`, with `??` standing in for missing parts.
    pub fn display_name(&self) -> String {
        format!(
            "{}#{}",
            self.game_name.as_deref().unwrap_or("??"),
            self.tag_line.as_deref().unwrap_or("??")
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub players: Vec<Player>,
    pub total_players: Option<u64>,
    pub start_index: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub uuid: String,
    pub display_name: String,
    #[serde(default)]
    pub display_icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeaponsResponse {
    #[serde(default)]
    pub weapons: Vec<Weapon>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    pub uuid: String,
    pub display_name: String,
    #[serde(default)]
    pub display_icon: Option<String>,
    #[serde(default)]
    pub full_render: Option<String>,
    #[serde(default)]
    pub levels: Vec<Value>,
    #[serde(default)]
    pub chromas: Vec<Value>,
}

impl Skin {
    /// Best image available for the skin card.
    pub fn image(&self) -> Option<&str> {
        self.full_render.as_deref().or(self.display_icon.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkinsResponse {
    #[serde(default)]
    pub skins: Vec<Skin>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_entry_defaults() {
        let entry: ContentEntry = serde_json::from_value(json!({
            "id": "e1",
            "name": "EPISODE 8",
            "type": "Episode"
        }))
        .unwrap();

        assert_eq!(entry.kind(), EntryKind::Episode);
        assert!(!entry.is_active);
        assert_eq!(entry.parent(), None);
    }

    #[test]
    fn test_empty_parent_counts_as_missing() {
        let entry: ContentEntry = serde_json::from_value(json!({
            "id": "a1",
            "name": "ACT I",
            "type": "act",
            "isActive": true,
            "parentId": ""
        }))
        .unwrap();

        assert_eq!(entry.kind(), EntryKind::Act);
        assert!(entry.is_active);
        assert_eq!(entry.parent(), None);
    }

    #[test]
    fn test_null_flags_decode_as_defaults() {
        let content: ContentResponse = serde_json::from_value(json!({
            "acts": [
                {"id": "e1", "name": null, "type": "episode", "isActive": null},
                {"id": "a1", "name": "ACT I", "type": "act", "isActive": true, "parentId": null}
            ]
        }))
        .unwrap();

        assert_eq!(content.acts.len(), 2);
        assert_eq!(content.acts[0].name, "");
        assert!(!content.acts[0].is_active);
        assert!(content.acts[1].is_active);
        assert_eq!(content.acts[1].parent(), None);
    }

    #[test]
    fn test_missing_lists_decode_empty() {
        let content: ContentResponse = serde_json::from_value(json!({})).unwrap();
        let board: LeaderboardResponse = serde_json::from_value(json!({"totalPlayers": 10})).unwrap();
        let skins: SkinsResponse = serde_json::from_value(json!({"skins": []})).unwrap();

        assert!(content.acts.is_empty());
        assert!(board.players.is_empty());
        assert_eq!(board.total_players, Some(10));
        assert!(skins.skins.is_empty());
    }

    #[test]
    fn test_player_display_name() {
        let player: Player = serde_json::from_value(json!({
            "gameName": "Sacy",
            "tagLine": "BR1",
            "leaderboardRank": 1,
            "rankedRating": 1200
        }))
        .unwrap();
        assert_eq!(player.display_name(), "Sacy#BR1");
        assert_eq!(Player::default().display_name(), "??#??");
    }

    #[test]
    fn test_region_parse_and_cycle() {
        assert_eq!("LATAM".parse::<Region>(), Ok(Region::Latam));
        assert!("xx".parse::<Region>().is_err());
        assert_eq!(Region::Br.cycle(-1), Region::Latam);
        assert_eq!(Region::Latam.cycle(1), Region::Br);
        assert_eq!(Region::Br.fallback(), Some(Region::Latam));
        assert_eq!(Region::Na.fallback(), None);
    }

    #[test]
    fn test_language_parse_and_next() {
        assert_eq!("en-us".parse::<Language>(), Ok(Language::EnUs));
        assert_eq!(Language::EsEs.next(), Language::PtBr);
    }

    #[test]
    fn test_skin_image_prefers_full_render() {
        let skin: Skin = serde_json::from_value(json!({
            "uuid": "s1",
            "displayName": "Prime Vandal",
            "displayIcon": "icon.png",
            "fullRender": "render.png",
            "levels": [{}, {}],
        }))
        .unwrap();
        assert_eq!(skin.image(), Some("render.png"));
        assert_eq!(skin.levels.len(), 2);
        assert!(skin.chromas.is_empty());
    }
}
