//! Outbound collaborators: feed, topic pages and Kakao messaging

pub mod feed;
pub mod kakao;
pub mod scrape;

use reqwest::Client;
use std::time::Duration;

use crate::errors::DigestError;

const HTTP_TIMEOUT_SECS: u64 = 30;

/// Shared HTTP client for feed, scrape and Kakao calls.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn http_client() -> Result<Client, DigestError> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| DigestError::HttpError(format!("Failed to build HTTP client: {e}")))
}

pub use feed::fetch_feed_items;
pub use kakao::{KakaoClient, resolve_access_token};
pub use scrape::fetch_topic_context;
