use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::warn;

use crate::errors::DigestError;

const DEFAULT_RSS_URL: &str = "https://news.hada.io/rss/news";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_TOP_N: usize = 7;
const DEFAULT_MAX_CHARS_PER_ITEM: usize = 180;

#[derive(Debug, Clone, Default)]
pub struct KakaoConfig {
    pub rest_api_key: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_code: String,
    pub refresh_token: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rss_url: String,
    pub top_n: usize,
    pub use_openai: bool,
    pub openai_api_key: String,
    pub openai_model: String,
    pub kakao: KakaoConfig,
    pub max_chars_per_item: usize,
    pub dry_run: bool,
}

impl AppConfig {
    /// Reads configuration from the process environment, after merging a
    /// `.env` file from the working directory. Variables already present in
    /// the environment take precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, DigestError> {
        let file_vars = load_dotenv(Path::new(".env"));
        Self::from_lookup(|key| {
            env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DigestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).unwrap_or_default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map_or(default, |v| v.trim().eq_ignore_ascii_case("true"))
        };
        let number = |key: &str, default: usize| -> Result<usize, DigestError> {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|e| DigestError::ConfigError(format!("{key}: {e}"))),
                None => Ok(default),
            }
        };

        Ok(Self {
            rss_url: lookup("GEEKNEWS_RSS_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_RSS_URL.to_string()),
            top_n: number("TOP_N", DEFAULT_TOP_N)?,
            use_openai: flag("USE_OPENAI", true),
            openai_api_key: text("OPENAI_API_KEY"),
            openai_model: lookup("OPENAI_MODEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            kakao: KakaoConfig {
                rest_api_key: text("KAKAO_REST_API_KEY"),
                client_secret: text("KAKAO_CLIENT_SECRET"),
                redirect_uri: text("KAKAO_REDIRECT_URI"),
                auth_code: text("KAKAO_AUTH_CODE"),
                refresh_token: text("KAKAO_REFRESH_TOKEN"),
                access_token: text("KAKAO_ACCESS_TOKEN"),
            },
            max_chars_per_item: number("MAX_CHARS_PER_ITEM", DEFAULT_MAX_CHARS_PER_ITEM)?,
            dry_run: flag("DRY_RUN", true),
        })
    }
}

/// Fails with `Missing required env: NAME` when `value` is empty.
///
/// # Errors
///
/// Returns `ConfigError` for an empty value.
pub fn required<'a>(value: &'a str, name: &str) -> Result<&'a str, DigestError> {
    if value.is_empty() {
        return Err(DigestError::ConfigError(format!(
            "Missing required env: {name}"
        )));
    }
    Ok(value)
}

/// Reads `KEY=VALUE` pairs from a dotenv file without touching the process
/// environment. The first value for a key wins. A missing file yields no
/// entries; malformed lines are skipped.
#[must_use]
pub fn load_dotenv(path: &Path) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let Ok(entries) = dotenvy::from_path_iter(path) else {
        return out;
    };
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                out.entry(key).or_insert(value);
            }
            Err(e) => warn!("Skipping unreadable line in {}: {}", path.display(), e),
        }
    }
    out
}
