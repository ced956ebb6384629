//! Topic page scraping: meta description and the outbound source link.

use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

use super::feed::decode_entities;
use crate::core::models::TopicContext;

const USER_AGENT: &str = "Mozilla/5.0 geeknews-kakao-bot";

/// Scraped summaries are cut to this many characters.
pub const MAX_SUMMARY_CHARS: usize = 300;

/// Meta tags consulted for a description, in priority order.
const META_DESCRIPTION_PATTERNS: &[&str] = &[
    r#"(?i)<meta[^>]+property=["']og:description["'][^>]+content=["']([^"']+)["'][^>]*>"#,
    r#"(?i)<meta[^>]+name=["']description["'][^>]+content=["']([^"']+)["'][^>]*>"#,
    r#"(?i)<meta[^>]+name=["']twitter:description["'][^>]+content=["']([^"']+)["'][^>]*>"#,
    r#"(?i)<meta[^>]+content=["']([^"']+)["'][^>]+name=["']description["'][^>]*>"#,
];

/// Hosts whose links never count as the original source.
const IGNORED_LINK_HOSTS: &[&str] = &["news.hada.io", "kakao.com"];

static META_DESCRIPTION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    META_DESCRIPTION_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

static ANCHOR_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]+href=["'](https?://[^"']+)["'][^>]*>"#)
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

#[must_use]
pub fn pick_meta_description(html: &str) -> String {
    META_DESCRIPTION_RES
        .iter()
        .filter_map(|re| re.captures(html))
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            decode_entities(m.as_str())
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// First absolute anchor pointing away from the aggregator, or `page_url`.
#[must_use]
pub fn pick_external_source_link(html: &str, page_url: &str) -> String {
    ANCHOR_HREF_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .find(|href| {
            let Ok(url) = Url::parse(href) else {
                return false;
            };
            url.host_str().is_some_and(|host| {
                !IGNORED_LINK_HOSTS
                    .iter()
                    .any(|ignored| host.ends_with(ignored))
            })
        })
        .map_or_else(|| page_url.to_string(), str::to_string)
}

/// Scrapes `page_url` for context. Never fails: any fetch problem yields an
/// empty summary with the page itself as the source link.
pub async fn fetch_topic_context(http: &Client, page_url: &str) -> TopicContext {
    let empty = || TopicContext {
        summary: String::new(),
        source_link: page_url.to_string(),
    };

    let response = match http
        .get(page_url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!("Topic page fetch failed for {}: {}", page_url, e);
            return empty();
        }
    };

    if !response.status().is_success() {
        warn!(
            "Topic page {} returned status {}",
            page_url,
            response.status()
        );
        return empty();
    }

    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            warn!("Topic page body unreadable for {}: {}", page_url, e);
            return empty();
        }
    };

    TopicContext {
        summary: pick_meta_description(&html)
            .chars()
            .take(MAX_SUMMARY_CHARS)
            .collect(),
        source_link: pick_external_source_link(&html, page_url),
    }
}
