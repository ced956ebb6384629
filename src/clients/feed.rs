//! RSS/Atom feed fetching and parsing

use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use tracing::info;

use crate::core::models::FeedItem;
use crate::errors::DigestError;

static RSS_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<item(?:\s[^>]*)?>(.*?)</item>")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

static ATOM_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<entry(?:\s[^>]*)?>(.*?)</entry>")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

static ATOM_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*href=["']([^"']+)["'][^>]*>"#)
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

static CDATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]+>").unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

const EMPTY_FEED_MESSAGE: &str =
    "RSS 파싱 결과가 0건입니다. RSS URL 응답 형식이 바뀌었는지 확인해 주세요.";

/// Decodes the handful of XML entities feeds actually use.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    input
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Unwraps CDATA, decodes entities, strips markup and collapses whitespace.
#[must_use]
pub fn clean_feed_text(input: &str) -> String {
    let unwrapped = CDATA_RE.replace_all(input, "$1");
    let decoded = decode_entities(&unwrapped);
    let stripped = TAG_RE.replace_all(&decoded, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>"))
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
}

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("title"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("link"));
static PUB_DATE_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("pubDate"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("description"));
static UPDATED_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("updated"));
static PUBLISHED_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("published"));
static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("summary"));
static CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("content"));

fn extract_tag(xml: &str, tag_re: &Regex) -> String {
    tag_re
        .captures(xml)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_feed_text(m.as_str()))
        .unwrap_or_default()
}

fn first_non_empty(xml: &str, tag_res: &[&Regex]) -> String {
    tag_res
        .iter()
        .map(|re| extract_tag(xml, re))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Parses RSS `<item>` records followed by Atom `<entry>` records, keeping
/// the first `top_n` that have both a title and a link.
///
/// # Errors
///
/// Returns `FeedError` when no usable record is found.
pub fn parse_feed(xml: &str, top_n: usize) -> Result<Vec<FeedItem>, DigestError> {
    let rss_items = RSS_ITEM_RE.captures_iter(xml).filter_map(|caps| {
        let body = caps.get(1)?.as_str();
        Some(FeedItem {
            title: extract_tag(body, &TITLE_RE),
            link: extract_tag(body, &LINK_RE),
            pub_date: extract_tag(body, &PUB_DATE_RE),
            description: extract_tag(body, &DESCRIPTION_RE),
        })
    });

    let atom_items = ATOM_ENTRY_RE.captures_iter(xml).filter_map(|caps| {
        let body = caps.get(1)?.as_str();
        Some(FeedItem {
            title: extract_tag(body, &TITLE_RE),
            link: ATOM_LINK_RE
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| clean_feed_text(m.as_str()))
                .unwrap_or_default(),
            pub_date: first_non_empty(body, &[&*UPDATED_RE, &*PUBLISHED_RE]),
            description: first_non_empty(body, &[&*SUMMARY_RE, &*CONTENT_RE]),
        })
    });

    let items: Vec<FeedItem> = rss_items
        .chain(atom_items)
        .filter(|item| !item.title.is_empty() && !item.link.is_empty())
        .take(top_n)
        .collect();

    if items.is_empty() {
        return Err(DigestError::FeedError(EMPTY_FEED_MESSAGE.to_string()));
    }
    Ok(items)
}

/// Fetches the feed at `url` and parses at most `top_n` items.
///
/// # Errors
///
/// Returns an error for transport failures, non-success statuses, or a feed
/// with no usable records.
pub async fn fetch_feed_items(
    http: &Client,
    url: &str,
    top_n: usize,
) -> Result<Vec<FeedItem>, DigestError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DigestError::FeedError(format!(
            "RSS fetch failed: {}",
            status.as_u16()
        )));
    }

    let xml = response.text().await?;
    let items = parse_feed(&xml, top_n)?;
    info!("Fetched {} article(s) from {}", items.len(), url);
    Ok(items)
}
