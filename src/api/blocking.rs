//! Blocking HTTP transport used by the terminal runtime's fetch workers.

use super::{ApiError, Query, Reply, build_url, check_status, decode_reply};
use reqwest::Url;
use std::time::Duration;

/// Client for the stats API; every [`Query`] goes through [`ApiClient::execute`].
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vtracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { base, http })
    }

    /// Sends the GET for `query` and returns the raw body of a 2xx response.
    fn fetch_body(&self, query: &Query) -> Result<String, ApiError> {
        let url = build_url(&self.base, query)?;
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        check_status(response.status().as_u16())?;
        response
            .text()
            .map_err(|err| ApiError::Transport(err.to_string()))
    }

    /// Runs any query and wraps the payload in the matching [`Reply`] variant.
    pub fn execute(&self, query: &Query) -> Result<Reply, ApiError> {
        decode_reply(query, &self.fetch_body(query)?)
    }
}
