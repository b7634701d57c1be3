//! Fetch wrapper and typed operations for the stats API.
//!
//! Everything here is transport-agnostic: [`Query`] names a logical operation,
//! [`build_url`] turns it into a GET URL under the configured base, and
//! [`check_status`] / [`decode_body`] interpret the response. The native
//! runtime sends requests with [`blocking::ApiClient`]; the browser build uses
//! [`web::execute`].

use crate::model::{
    ContentResponse, Language, LeaderboardResponse, Region, SkinsResponse, WeaponsResponse,
};
use reqwest::Url;
use serde::de::DeserializeOwned;

#[cfg(not(target_arch = "wasm32"))]
pub mod blocking;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Failure of a single API call. The `Display` form is shown verbatim in the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid API base URL '{0}'")]
    InvalidUrl(String),
}

/// A logical API operation with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Content {
        region: Region,
        locale: Language,
    },
    Leaderboard {
        act_id: String,
        region: Region,
        size: usize,
        start_index: usize,
    },
    Weapons {
        language: Language,
    },
    WeaponSkins {
        weapon_uuid: String,
        language: Language,
    },
    SearchSkins {
        language: Language,
        q: Option<String>,
        weapon_uuid: Option<String>,
    },
}

impl Query {
    /// Path segments appended to the base URL.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Content { .. } => vec!["content"],
            Self::Leaderboard { .. } => vec!["leaderboard"],
            Self::Weapons { .. } => vec!["weapons"],
            Self::WeaponSkins { weapon_uuid, .. } => vec!["weapons", weapon_uuid, "skins"],
            Self::SearchSkins { .. } => vec!["skins"],
        }
    }

    /// Query-string parameters, in the order they are appended.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Content { region, locale } => vec![
                ("region", region.as_str().to_string()),
                ("locale", locale.as_str().to_string()),
            ],
            Self::Leaderboard {
                act_id,
                region,
                size,
                start_index,
            } => vec![
                ("actId", act_id.clone()),
                ("region", region.as_str().to_string()),
                ("size", size.to_string()),
                ("startIndex", start_index.to_string()),
            ],
            Self::Weapons { language } | Self::WeaponSkins { language, .. } => {
                vec![("language", language.as_str().to_string())]
            }
            Self::SearchSkins {
                language,
                q,
                weapon_uuid,
            } => {
                let mut params = vec![("language", language.as_str().to_string())];
                if let Some(q) = q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
                    params.push(("q", q.to_string()));
                }
                if let Some(uuid) = weapon_uuid.as_deref().filter(|u| !u.is_empty()) {
                    params.push(("weaponUuid", uuid.to_string()));
                }
                params
            }
        }
    }

    /// Short label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Content { .. } => "content",
            Self::Leaderboard { .. } => "leaderboard",
            Self::Weapons { .. } => "weapons",
            Self::WeaponSkins { .. } => "weapon_skins",
            Self::SearchSkins { .. } => "search_skins",
        }
    }
}

/// Decoded payload of a [`Query`]; the variant always matches the query kind.
#[derive(Debug, Clone)]
pub enum Reply {
    Content(ContentResponse),
    Leaderboard(LeaderboardResponse),
    Weapons(WeaponsResponse),
    Skins(SkinsResponse),
}

macro_rules! reply_conversion {
    ($variant:ident, $ty:ty) => {
        impl TryFrom<Reply> for $ty {
            type Error = ApiError;

            fn try_from(reply: Reply) -> Result<Self, Self::Error> {
                match reply {
                    Reply::$variant(inner) => Ok(inner),
                    other => Err(ApiError::Decode(format!(
                        "expected {} reply, got {}",
                        stringify!($variant),
                        other.kind()
                    ))),
                }
            }
        }
    };
}

reply_conversion!(Content, ContentResponse);
reply_conversion!(Leaderboard, LeaderboardResponse);
reply_conversion!(Weapons, WeaponsResponse);
reply_conversion!(Skins, SkinsResponse);

impl Reply {
    fn kind(&self) -> &'static str {
        match self {
            Self::Content(_) => "Content",
            Self::Leaderboard(_) => "Leaderboard",
            Self::Weapons(_) => "Weapons",
            Self::Skins(_) => "Skins",
        }
    }
}

/// Parses the configured base URL once, up front.
pub fn parse_base(base: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base.trim()).map_err(|_| ApiError::InvalidUrl(base.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(base.to_string()));
    }
    Ok(url)
}

/// Builds the GET URL for `query` below `base`.
pub fn build_url(base: &Url, query: &Query) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(query.segments());

    let params = query.params();
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Rejects any non-2xx status.
pub fn check_status(status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}

pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Decodes a successful body into the [`Reply`] variant matching `query`.
pub fn decode_reply(query: &Query, body: &str) -> Result<Reply, ApiError> {
    Ok(match query {
        Query::Content { .. } => Reply::Content(decode_body(body)?),
        Query::Leaderboard { .. } => Reply::Leaderboard(decode_body(body)?),
        Query::Weapons { .. } => Reply::Weapons(decode_body(body)?),
        Query::WeaponSkins { .. } | Query::SearchSkins { .. } => Reply::Skins(decode_body(body)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_base("http://localhost:5001/api").unwrap()
    }

    #[test]
    fn test_content_url() {
        let url = build_url(
            &base(),
            &Query::Content {
                region: Region::Br,
                locale: Language::PtBr,
            },
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/content?region=br&locale=pt-BR"
        );
    }

    #[test]
    fn test_leaderboard_url_carries_offset() {
        let url = build_url(
            &base(),
            &Query::Leaderboard {
                act_id: "a2".to_string(),
                region: Region::Latam,
                size: 50,
                start_index: 100,
            },
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/leaderboard?actId=a2&region=latam&size=50&startIndex=100"
        );
    }

    #[test]
    fn test_trailing_slash_base_and_weapon_path() {
        let base = parse_base("http://example.test/api/").unwrap();
        let url = build_url(
            &base,
            &Query::WeaponSkins {
                weapon_uuid: "9c82e19d-4575".to_string(),
                language: Language::EnUs,
            },
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.test/api/weapons/9c82e19d-4575/skins?language=en-US"
        );
    }

    #[test]
    fn test_search_skips_blank_query() {
        let url = build_url(
            &base(),
            &Query::SearchSkins {
                language: Language::PtBr,
                q: Some("   ".to_string()),
                weapon_uuid: None,
            },
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/skins?language=pt-BR");

        let url = build_url(
            &base(),
            &Query::SearchSkins {
                language: Language::PtBr,
                q: Some(" prime ".to_string()),
                weapon_uuid: Some("w1".to_string()),
            },
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/skins?language=pt-BR&q=prime&weaponUuid=w1"
        );
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(parse_base("not a url"), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(parse_base("mailto:me@example.test"), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_status_error_display() {
        assert!(check_status(200).is_ok());
        assert!(check_status(204).is_ok());
        let err = check_status(503).unwrap_err();
        assert_eq!(err, ApiError::Status(503));
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn test_decode_reply_matches_query() {
        let query = Query::Weapons {
            language: Language::PtBr,
        };
        let reply = decode_reply(
            &query,
            r#"{"weapons":[{"uuid":"w1","displayName":"Vandal","category":"Rifle"}]}"#,
        )
        .unwrap();
        let weapons = WeaponsResponse::try_from(reply).unwrap();
        assert_eq!(weapons.weapons[0].display_name, "Vandal");

        assert!(matches!(decode_reply(&query, "<html>"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_reply_conversion_mismatch() {
        let reply = Reply::Skins(SkinsResponse::default());
        assert!(matches!(
            ContentResponse::try_from(reply),
            Err(ApiError::Decode(_))
        ));
    }
}
