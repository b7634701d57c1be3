//! Leaderboard view-model: region/episode/act selection and the paginated
//! player loader.
//!
//! The state machine is driven entirely through [`LeaderboardState::dispatch`].
//! It never performs I/O; every transition that needs data returns the
//! [`FetchRequest`]s the runtime must execute, and the results come back as
//! [`LeaderboardAction::ContentLoaded`] / [`LeaderboardAction::PageLoaded`].

use crate::api::{ApiError, Query, Reply};
use crate::app_core::request::{FetchRequest, RequestId};
use crate::model::{
    ContentEntry, ContentResponse, EntryKind, Language, LeaderboardResponse, Player, Region,
};

/// Entries requested per leaderboard page.
pub const PAGE_SIZE: usize = 50;

/// Observable loader phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No act selected, nothing to load.
    Idle,
    Loading { page: usize },
    Ready { can_load_more: bool },
}

/// Selector that receives Left/Right in the leaderboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardFocus {
    #[default]
    Region,
    Episode,
    Act,
}

impl LeaderboardFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Region => Self::Episode,
            Self::Episode => Self::Act,
            Self::Act => Self::Region,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Region => Self::Act,
            Self::Episode => Self::Region,
            Self::Act => Self::Episode,
        }
    }
}

#[derive(Debug, Clone)]
pub enum LeaderboardAction {
    SelectRegion(Region),
    SelectEpisode(String),
    SelectAct(String),
    LoadMore,
    Reload,
    ContentLoaded {
        id: RequestId,
        result: Result<ContentResponse, ApiError>,
    },
    PageLoaded {
        id: RequestId,
        result: Result<LeaderboardResponse, ApiError>,
    },
}

/// The page request currently awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingPage {
    id: RequestId,
    region: Region,
    page: usize,
    /// Set on the chained request issued after an empty first page.
    fallback: bool,
}

#[derive(Debug, Clone)]
pub struct LeaderboardState {
    /// Region used for content and page requests. The fallback rule may switch it.
    pub region: Region,
    pub locale: Language,
    pub episodes: Vec<ContentEntry>,
    /// All acts of the last content load, with parents inferred where missing.
    pub acts: Vec<ContentEntry>,
    pub episode_id: Option<String>,
    pub act_id: Option<String>,
    /// Accumulated players of the current (region, act) session.
    pub players: Vec<Player>,
    /// Number of pages adopted in the current session.
    pub page: usize,
    pub can_load_more: bool,
    pub error: Option<String>,
    pub focus: LeaderboardFocus,
    pub selected_row: usize,
    content_request: Option<RequestId>,
    pending_page: Option<PendingPage>,
}

impl LeaderboardState {
    pub fn new(region: Region, locale: Language) -> Self {
        Self {
            region,
            locale,
            episodes: Vec::new(),
            acts: Vec::new(),
            episode_id: None,
            act_id: None,
            players: Vec::new(),
            page: 0,
            can_load_more: false,
            error: None,
            focus: LeaderboardFocus::default(),
            selected_row: 0,
            content_request: None,
            pending_page: None,
        }
    }

    /// Initial content fetch for a freshly opened view.
    pub fn start(&mut self) -> Vec<FetchRequest> {
        vec![self.request_content()]
    }

    pub fn phase(&self) -> LoadPhase {
        if let Some(pending) = &self.pending_page {
            return LoadPhase::Loading {
                page: pending.page,
            };
        }
        if self.act_id.is_none() {
            return LoadPhase::Idle;
        }
        LoadPhase::Ready {
            can_load_more: self.can_load_more,
        }
    }

    pub fn is_content_loading(&self) -> bool {
        self.content_request.is_some()
    }

    /// Whether `id` is the content or page request this view is waiting for.
    pub fn awaits(&self, id: RequestId) -> bool {
        self.content_request == Some(id) || self.pending_page.as_ref().is_some_and(|p| p.id == id)
    }

    pub fn dispatch(&mut self, action: LeaderboardAction) -> Vec<FetchRequest> {
        match action {
            LeaderboardAction::SelectRegion(region) => {
                if region == self.region {
                    return Vec::new();
                }
                self.region = region;
                self.episodes.clear();
                self.acts.clear();
                self.episode_id = None;
                self.act_id = None;
                self.reset_session();
                vec![self.request_content()]
            }
            LeaderboardAction::SelectEpisode(episode_id) => {
                if self.episode_id.as_deref() == Some(episode_id.as_str()) {
                    return Vec::new();
                }
                if !self.episodes.iter().any(|e| e.id == episode_id) {
                    tracing::debug!(episode = %episode_id, "ignoring unknown episode");
                    return Vec::new();
                }
                let act_id = default_act(&self.acts_for(&episode_id)).map(|a| a.id.clone());
                self.act_id = act_id;
                self.episode_id = Some(episode_id);
                self.start_session()
            }
            LeaderboardAction::SelectAct(act_id) => {
                if self.act_id.as_deref() == Some(act_id.as_str()) {
                    return Vec::new();
                }
                let belongs = self
                    .episode_id
                    .as_deref()
                    .is_some_and(|ep| self.acts_for(ep).iter().any(|a| a.id == act_id));
                if !belongs {
                    tracing::debug!(act = %act_id, "ignoring act outside the selected episode");
                    return Vec::new();
                }
                self.act_id = Some(act_id);
                self.start_session()
            }
            LeaderboardAction::LoadMore => {
                if self.content_request.is_some()
                    || self.pending_page.is_some()
                    || !self.can_load_more
                {
                    return Vec::new();
                }
                self.request_page(self.page, self.region, false)
                    .into_iter()
                    .collect()
            }
            LeaderboardAction::Reload => {
                self.pending_page = None;
                vec![self.request_content()]
            }
            LeaderboardAction::ContentLoaded { id, result } => {
                if self.content_request != Some(id) {
                    return Vec::new();
                }
                self.content_request = None;
                match result {
                    Ok(content) => self.apply_content(content),
                    Err(err) => {
                        tracing::warn!(region = %self.region, error = %err, "content load failed");
                        self.error = Some(err.to_string());
                        Vec::new()
                    }
                }
            }
            LeaderboardAction::PageLoaded { id, result } => {
                let Some(pending) = self.pending_page.take_if(|p| p.id == id) else {
                    tracing::debug!(request = %id, "dropping stale leaderboard page");
                    return Vec::new();
                };
                match result {
                    Ok(response) => self.apply_page(pending, response.players),
                    Err(err) => {
                        tracing::warn!(page = pending.page, error = %err, "leaderboard page failed");
                        self.error = Some(err.to_string());
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Routes a raw runtime response into `ContentLoaded` or `PageLoaded`.
    pub fn handle_response(
        &mut self,
        id: RequestId,
        outcome: Result<Reply, ApiError>,
    ) -> Vec<FetchRequest> {
        if self.content_request == Some(id) {
            let result = outcome.and_then(ContentResponse::try_from);
            self.dispatch(LeaderboardAction::ContentLoaded { id, result })
        } else {
            let result = outcome.and_then(LeaderboardResponse::try_from);
            self.dispatch(LeaderboardAction::PageLoaded { id, result })
        }
    }

    /// Acts of `episode_id` in list order.
    pub fn acts_for(&self, episode_id: &str) -> Vec<&ContentEntry> {
        self.acts
            .iter()
            .filter(|a| a.parent() == Some(episode_id))
            .collect()
    }

    /// Acts of the selected episode as shown in the act selector, sorted by
    /// name (case-insensitive).
    pub fn act_choices(&self) -> Vec<&ContentEntry> {
        let mut acts = self
            .episode_id
            .as_deref()
            .map(|ep| self.acts_for(ep))
            .unwrap_or_default();
        acts.sort_by_key(|a| a.name.to_lowercase());
        acts
    }

    pub fn selected_episode(&self) -> Option<&ContentEntry> {
        let id = self.episode_id.as_deref()?;
        self.episodes.iter().find(|e| e.id == id)
    }

    pub fn selected_act(&self) -> Option<&ContentEntry> {
        let id = self.act_id.as_deref()?;
        self.acts.iter().find(|a| a.id == id)
    }

    /// Moves the focused selector by `step` (wrapping) and returns the resulting requests.
    pub fn step_focused(&mut self, step: i32) -> Vec<FetchRequest> {
        let action = match self.focus {
            LeaderboardFocus::Region => Some(LeaderboardAction::SelectRegion(self.region.cycle(step))),
            LeaderboardFocus::Episode => {
                let ids: Vec<&str> = self.episodes.iter().map(|e| e.id.as_str()).collect();
                wrap_step(&ids, self.episode_id.as_deref(), step)
                    .map(|id| LeaderboardAction::SelectEpisode(id.to_string()))
            }
            LeaderboardFocus::Act => {
                let choices = self.act_choices();
                let ids: Vec<&str> = choices.iter().map(|a| a.id.as_str()).collect();
                wrap_step(&ids, self.act_id.as_deref(), step)
                    .map(|id| LeaderboardAction::SelectAct(id.to_string()))
            }
        };
        action.map(|a| self.dispatch(a)).unwrap_or_default()
    }

    pub fn move_row(&mut self, delta: i32) {
        if self.players.is_empty() {
            self.selected_row = 0;
            return;
        }
        let max = self.players.len() - 1;
        let row = self.selected_row as i64 + delta as i64;
        self.selected_row = row.clamp(0, max as i64) as usize;
    }

    /// Status line text for the table footer.
    pub fn status_text(&self) -> String {
        match self.phase() {
            LoadPhase::Loading { page: 0 } => "Loading…".to_string(),
            _ if self.content_request.is_some() && self.players.is_empty() => "Loading…".to_string(),
            _ => format!("{} players loaded", self.players.len()),
        }
    }

    fn request_content(&mut self) -> FetchRequest {
        let request = FetchRequest::new(Query::Content {
            region: self.region,
            locale: self.locale,
        });
        tracing::debug!(request = %request.id, region = %self.region, "requesting content");
        self.content_request = Some(request.id);
        request
    }

    fn request_page(&mut self, page: usize, region: Region, fallback: bool) -> Option<FetchRequest> {
        let act_id = self.act_id.clone()?;
        let request = FetchRequest::new(Query::Leaderboard {
            act_id,
            region,
            size: PAGE_SIZE,
            start_index: page * PAGE_SIZE,
        });
        tracing::debug!(request = %request.id, %region, page, fallback, "requesting leaderboard page");
        self.pending_page = Some(PendingPage {
            id: request.id,
            region,
            page,
            fallback,
        });
        Some(request)
    }

    fn reset_session(&mut self) {
        self.players.clear();
        self.page = 0;
        self.can_load_more = false;
        self.pending_page = None;
        self.selected_row = 0;
    }

    fn start_session(&mut self) -> Vec<FetchRequest> {
        self.reset_session();
        self.request_page(0, self.region, false)
            .into_iter()
            .collect()
    }

    fn apply_content(&mut self, content: ContentResponse) -> Vec<FetchRequest> {
        let (episodes, acts) = link_content(content.acts);
        self.episodes = episodes;
        self.acts = acts;
        self.error = None;

        let keep_episode = self
            .episode_id
            .as_deref()
            .is_some_and(|id| self.episodes.iter().any(|e| e.id == id));
        if !keep_episode {
            self.episode_id = default_episode(&self.episodes).map(|e| e.id.clone());
        }

        let act_id = {
            let episode_acts = self
                .episode_id
                .as_deref()
                .map(|ep| self.acts_for(ep))
                .unwrap_or_default();
            match self.act_id.as_deref() {
                Some(id) if episode_acts.iter().any(|a| a.id == id) => Some(id.to_string()),
                _ => default_act(&episode_acts).map(|a| a.id.clone()),
            }
        };
        self.act_id = act_id;

        tracing::info!(
            region = %self.region,
            episodes = self.episodes.len(),
            acts = self.acts.len(),
            "content loaded"
        );
        self.start_session()
    }

    fn apply_page(&mut self, pending: PendingPage, chunk: Vec<Player>) -> Vec<FetchRequest> {
        if chunk.is_empty()
            && pending.page == 0
            && !pending.fallback
            && let Some(fallback) = pending.region.fallback()
        {
            tracing::info!(from = %pending.region, to = %fallback, "empty first page, trying fallback region");
            return self.request_page(0, fallback, true).into_iter().collect();
        }

        if pending.fallback && !chunk.is_empty() {
            tracing::info!(region = %pending.region, "adopting fallback region");
            self.region = pending.region;
        }

        self.can_load_more = chunk.len() >= PAGE_SIZE;
        self.players.extend(chunk);
        self.page = pending.page + 1;
        self.error = None;
        Vec::new()
    }
}

/// Splits a flat content list into episodes and acts, inferring missing act parents.
///
/// An act without a parent belongs to the first episode (list order) whose
/// lower-cased name is a substring of the act's lower-cased name. Episodes
/// with blank names never match.
pub fn link_content(entries: Vec<ContentEntry>) -> (Vec<ContentEntry>, Vec<ContentEntry>) {
    let (episodes, acts): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .filter(|e| e.kind() != EntryKind::Other)
        .partition(|e| e.kind() == EntryKind::Episode);

    let acts = acts
        .into_iter()
        .map(|mut act| {
            if act.parent().is_none() {
                let name = act.name.to_lowercase();
                act.parent_id = episodes
                    .iter()
                    .filter(|ep| !ep.name.trim().is_empty())
                    .find(|ep| name.contains(&ep.name.to_lowercase()))
                    .map(|ep| ep.id.clone());
            }
            act
        })
        .collect();

    (episodes, acts)
}

/// Active episode, else the last one.
pub fn default_episode(episodes: &[ContentEntry]) -> Option<&ContentEntry> {
    episodes.iter().find(|e| e.is_active).or(episodes.last())
}

/// Active act, else the last one.
pub fn default_act<'a>(acts: &[&'a ContentEntry]) -> Option<&'a ContentEntry> {
    acts.iter().find(|a| a.is_active).or(acts.last()).copied()
}

fn wrap_step<'a>(ids: &[&'a str], current: Option<&str>, step: i32) -> Option<&'a str> {
    if ids.is_empty() {
        return None;
    }
    let len = ids.len() as i32;
    let idx = current
        .and_then(|c| ids.iter().position(|id| *id == c))
        .map(|i| i as i32)
        .unwrap_or(0);
    Some(ids[(idx + step).rem_euclid(len) as usize])
}
