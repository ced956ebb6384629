//! Digest message rendering

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Seoul;

use crate::core::models::DigestEntry;

/// Titles longer than this are cut with an ellipsis.
pub const MAX_TITLE_CHARS: usize = 70;

const DIGEST_HEADER: &str = "[GeekNews 핵심 브리핑]";

fn limit(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        text.to_string()
    }
}

/// Date label for the header, e.g. `2026. 10. 18.`, in Korea time.
#[must_use]
pub fn korean_date_label(now: DateTime<Utc>) -> String {
    now.with_timezone(&Seoul).format("%Y. %m. %d.").to_string()
}

/// Renders the full digest: header, then one numbered block per entry.
#[must_use]
pub fn format_digest(entries: &[DigestEntry], date_label: &str) -> String {
    let mut lines = vec![format!("{DIGEST_HEADER} {date_label}")];

    for (idx, entry) in entries.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. {}", idx + 1, limit(&entry.title, MAX_TITLE_CHARS)));
        lines.push("핵심:".to_string());
        lines.push(entry.key_point.clone());
        lines.push(format!("링크: {}", entry.link));
        if let Some(source) = entry
            .source_link
            .as_deref()
            .filter(|s| !s.is_empty() && *s != entry.link)
        {
            lines.push(format!("원문: {source}"));
        }
    }

    lines.join("\n")
}
