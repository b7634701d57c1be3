//! Browser transport: the same queries over the async `fetch`-backed reqwest client.

use super::{ApiError, Query, Reply, build_url, check_status, decode_reply};
use reqwest::Url;

pub async fn execute(base: &Url, query: &Query) -> Result<Reply, ApiError> {
    let url = build_url(base, query)?;
    let response = reqwest::get(url)
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    check_status(response.status().as_u16())?;
    let body = response
        .text()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    decode_reply(query, &body)
}
