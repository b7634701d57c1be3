//! Request envelopes exchanged between view-models and the runtimes.
//!
//! View-models never perform I/O. They hand back [`FetchRequest`]s, the runtime
//! executes them and feeds the [`FetchResponse`] back through
//! `AppState::apply_response`. A response is only accepted by the view that is
//! still waiting for its [`RequestId`].

use crate::api::{ApiError, Query, Reply};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique id attached to every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub query: Query,
}

impl FetchRequest {
    pub fn new(query: Query) -> Self {
        Self {
            id: RequestId::next(),
            query,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub id: RequestId,
    pub outcome: Result<Reply, ApiError>,
}

/// Loading/error/data triple for a single remote resource.
///
/// Stale data survives a failed refetch; the error is cleared by the next
/// successful response.
#[derive(Debug, Clone)]
pub struct Remote<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pending: Option<RequestId>,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            pending: None,
        }
    }
}

impl<T> Remote<T>
where
    T: TryFrom<Reply, Error = ApiError>,
{
    /// Starts a fetch and forgets any request issued before it.
    pub fn begin(&mut self, query: Query) -> FetchRequest {
        let request = FetchRequest::new(query);
        self.pending = Some(request.id);
        request
    }

    /// Applies the outcome when `id` is the awaited request.
    ///
    /// Returns `false` for stale responses, leaving the state untouched.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<Reply, ApiError>) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;
        match outcome.and_then(T::try_from) {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(request = %id, error = %err, "fetch failed");
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_waiting_for(&self, id: RequestId) -> bool {
        self.pending == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, WeaponsResponse};

    fn weapons_query() -> Query {
        Query::Weapons {
            language: Language::PtBr,
        }
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestId::next();
        let b = RequestId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_remote_drops_superseded_response() {
        let mut remote: Remote<WeaponsResponse> = Remote::default();
        let first = remote.begin(weapons_query());
        let second = remote.begin(weapons_query());

        assert!(!remote.resolve(first.id, Ok(Reply::Weapons(WeaponsResponse::default()))));
        assert!(remote.data.is_none());
        assert!(remote.is_loading());

        assert!(remote.resolve(second.id, Ok(Reply::Weapons(WeaponsResponse::default()))));
        assert!(remote.data.is_some());
        assert!(!remote.is_loading());
    }

    #[test]
    fn test_remote_keeps_stale_data_on_error() {
        let mut remote: Remote<WeaponsResponse> = Remote::default();
        let req = remote.begin(weapons_query());
        remote.resolve(req.id, Ok(Reply::Weapons(WeaponsResponse::default())));

        let req = remote.begin(weapons_query());
        remote.resolve(req.id, Err(ApiError::Status(500)));
        assert!(remote.data.is_some());
        assert_eq!(remote.error.as_deref(), Some("HTTP 500"));

        let req = remote.begin(weapons_query());
        remote.resolve(req.id, Ok(Reply::Weapons(WeaponsResponse::default())));
        assert!(remote.error.is_none());
    }
}
