//! newsdigest - Turns a tech news feed into a Kakao "send to me" briefing.
//!
//! Each feed item is condensed into exactly five short Korean bullet lines
//! that fit a per-item character budget, suitable for a push notification.
//!
//! # Architecture
//!
//! The system uses:
//! - reqwest for the feed, topic pages, `OpenAI` and Kakao
//! - openai-api-rs message types for the Responses API prompt
//! - a pure normalization-and-fitting pipeline (`keypoint`) that coerces model
//!   output, or plain extraction when no model is configured, into the
//!   five-line contract
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use newsdigest::ai::LlmClient;
//! use newsdigest::core::models::{GenerationOptions, SourceItem};
//! use newsdigest::keypoint::build_key_point;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     newsdigest::setup_logging();
//!
//!     let item = SourceItem {
//!         title: "새 모델 공개".to_string(),
//!         description: "성능이 크게 향상되었습니다. 비용도 절감되었습니다.".to_string(),
//!         context: String::new(),
//!         link: "https://news.hada.io/topic?id=1".to_string(),
//!     };
//!     let options = GenerationOptions {
//!         use_model: true,
//!         api_key: "dummy_openai_key".to_string(),
//!         model: "gpt-4.1-mini".to_string(),
//!         max_chars_per_item: 180,
//!     };
//!
//!     let client = LlmClient::new()?;
//!     let block = build_key_point(&item, &options, &client).await?;
//!     println!("{block}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod app;
pub mod clients;
pub mod core;
pub mod errors;
pub mod format;
pub mod keypoint;
pub mod prompt;
pub mod utils;

/// Configure structured logging with JSON output.
///
/// Honours `RUST_LOG` and defaults to `info`. Calling it more than once is
/// harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// newsdigest::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
