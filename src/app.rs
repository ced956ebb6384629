//! End-to-end digest run: fetch, summarize, render and deliver.

use chrono::Utc;
use reqwest::Client;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::ai::TextGenerator;
use crate::clients::kakao::{KakaoClient, TokenSource, resolve_access_token};
use crate::clients::{fetch_feed_items, fetch_topic_context};
use crate::core::config::AppConfig;
use crate::core::models::{DigestEntry, GenerationOptions, SourceItem};
use crate::errors::DigestError;
use crate::format::{format_digest, korean_date_label};
use crate::keypoint::build_key_point;

/// What a run produced and whether it was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub text: String,
    pub delivered: bool,
    pub token_source: Option<TokenSource>,
    /// Refresh token the operator should persist for the next run.
    pub refresh_token: Option<String>,
}

/// Collaborators a run talks to.
pub struct DigestServices<'a> {
    pub http: &'a Client,
    pub generator: &'a dyn TextGenerator,
    pub kakao: &'a KakaoClient,
}

#[must_use]
pub fn generation_options(config: &AppConfig) -> GenerationOptions {
    GenerationOptions {
        use_model: config.use_openai,
        api_key: config.openai_api_key.clone(),
        model: config.openai_model.clone(),
        max_chars_per_item: config.max_chars_per_item,
    }
}

/// Fetches the feed and builds one entry per item, one item at a time.
///
/// # Errors
///
/// Returns feed errors and generation transport errors.
pub async fn collect_entries(
    config: &AppConfig,
    http: &Client,
    generator: &dyn TextGenerator,
) -> Result<Vec<DigestEntry>, DigestError> {
    let items = fetch_feed_items(http, &config.rss_url, config.top_n).await?;
    let options = generation_options(config);

    let mut entries = Vec::with_capacity(items.len());
    for item in &items {
        let topic = fetch_topic_context(http, &item.link).await;
        let source = SourceItem::from_feed(item, &topic.summary);
        let key_point = build_key_point(&source, &options, generator).await?;
        entries.push(DigestEntry {
            title: item.title.clone(),
            link: item.link.clone(),
            key_point,
            source_link: Some(topic.source_link),
        });
    }
    Ok(entries)
}

/// Runs the whole digest. In dry-run mode the message is only rendered.
///
/// # Errors
///
/// Returns the first feed, generation, configuration or Kakao error.
pub async fn run_digest(
    config: &AppConfig,
    services: &DigestServices<'_>,
) -> Result<RunReport, DigestError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("digest_run", %run_id, dry_run = config.dry_run);
    run_digest_inner(config, services).instrument(span).await
}

async fn run_digest_inner(
    config: &AppConfig,
    services: &DigestServices<'_>,
) -> Result<RunReport, DigestError> {
    let entries = collect_entries(config, services.http, services.generator).await?;
    let text = format_digest(&entries, &korean_date_label(Utc::now()));

    if config.dry_run {
        info!("Dry run: rendered {} entries without sending", entries.len());
        return Ok(RunReport {
            text,
            delivered: false,
            token_source: None,
            refresh_token: None,
        });
    }

    let token = resolve_access_token(services.kakao, &config.kakao).await?;
    services.kakao.send_memo(&token.access_token, &text).await?;
    info!("Sent Kakao memo (token source: {})", token.source);

    Ok(RunReport {
        text,
        delivered: true,
        token_source: Some(token.source),
        refresh_token: token.refresh_token,
    })
}
