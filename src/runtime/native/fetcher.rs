//! Fetch workers: one short-lived thread per request, results over an mpsc channel.

use crate::api::ApiError;
use crate::api::blocking::ApiClient;
use crate::app_core::request::{FetchRequest, FetchResponse};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

pub struct Fetcher {
    client: ApiClient,
    tx: Sender<FetchResponse>,
    rx: Receiver<FetchResponse>,
}

impl Fetcher {
    pub fn new(client: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { client, tx, rx }
    }

    /// Runs `request` on a worker thread. Nothing is ever cancelled; stale
    /// results are dropped by the view that no longer waits for them.
    pub fn spawn(&self, request: FetchRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let id = request.id;
        tracing::debug!(request = %id, query = request.query.name(), "spawning fetch");

        let spawned = thread::Builder::new()
            .name(format!("fetch-{}", request.query.name()))
            .spawn(move || {
                let outcome = client.execute(&request.query);
                tracing::debug!(request = %request.id, ok = outcome.is_ok(), "fetch finished");
                let _ = tx.send(FetchResponse {
                    id: request.id,
                    outcome,
                });
            });

        if let Err(err) = spawned {
            tracing::error!(request = %id, error = %err, "could not spawn fetch worker");
            let _ = self.tx.send(FetchResponse {
                id,
                outcome: Err(ApiError::Transport(err.to_string())),
            });
        }
    }

    /// Finished responses, without blocking.
    pub fn drain(&self) -> Vec<FetchResponse> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Query, parse_base};
    use crate::model::Language;
    use std::time::{Duration, Instant};

    #[test]
    fn test_failed_fetch_is_delivered() {
        let base = parse_base("http://127.0.0.1:9/api").unwrap();
        let fetcher = Fetcher::new(ApiClient::new(base, Duration::from_millis(500)).unwrap());
        let request = FetchRequest::new(Query::Weapons {
            language: Language::PtBr,
        });
        let id = request.id;
        fetcher.spawn(request);

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut responses = Vec::new();
        while responses.is_empty() && Instant::now() < deadline {
            responses = fetcher.drain();
            thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, id);
        assert!(matches!(responses[0].outcome, Err(ApiError::Transport(_))));
    }
}
