//! Pattern tables for lines that never belong in a key point, plus the
//! near-duplicate test used by deduplication and filling.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::text::normalize_spacing;

/// Openers that mark a greeting or self-referential line, checked in order.
/// `이번 글에서는` is listed separately so it matches on its own boundary.
pub const GREETING_OPENERS: &[&str] = &[
    "안녕하세요",
    "반갑습니다",
    "안녕",
    "이번 글",
    "이번 글에서는",
    "오늘은",
    "저는",
    "제가",
];

/// Placeholders leaked from prompt templates and known malformed boilerplate.
pub const NOISE_PATTERNS: &[&str] = &[
    r"(?i)요약원문",
    r"(?i)추가문맥",
    r"(?i)세\s*가지에\s*집중했습니다1\.",
];

/// Token-overlap ratio at or above which two lines count as duplicates.
pub const NEAR_DUPLICATE_OVERLAP: f64 = 0.8;

/// Minimum normalized length before containment alone marks a duplicate.
pub const CONTAINMENT_MIN_CHARS: usize = 20;

/// Tokens shorter than this are ignored by the overlap score.
const MIN_TOKEN_CHARS: usize = 2;

static NOISE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NOISE_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// True when the line opens with one of [`GREETING_OPENERS`] followed by a
/// boundary.
///
/// Every opener ends in Hangul, so a boundary is anything except another
/// non-ASCII letter or digit: end of text, whitespace, punctuation, or an
/// ASCII word character (`저는rust` counts, `저는것` does not).
#[must_use]
pub fn is_greeting_sentence(text: &str) -> bool {
    let normalized = normalize_spacing(text);
    GREETING_OPENERS.iter().any(|opener| {
        normalized
            .strip_prefix(opener)
            .is_some_and(|rest| rest.chars().next().is_none_or(is_opener_boundary))
    })
}

fn is_opener_boundary(next: char) -> bool {
    next.is_ascii() || !next.is_alphanumeric()
}

#[must_use]
pub fn is_noise_sentence(text: &str) -> bool {
    let normalized = normalize_spacing(text);
    NOISE_RES.iter().any(|re| re.is_match(&normalized))
}

/// Lowercased, punctuation-free form used for comparisons.
#[must_use]
pub fn normalize_for_compare(text: &str) -> String {
    let lowered = normalize_spacing(text).to_lowercase();
    let kept: String = lowered
        .chars()
        .map(|c| {
            let keep = c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || ('\u{AC00}'..='\u{D7A3}').contains(&c)
                || c.is_whitespace();
            if keep { c } else { ' ' }
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shared tokens divided by the size of the smaller token set.
#[must_use]
pub fn overlap_score(a: &str, b: &str) -> f64 {
    let tokens = |s: &str| -> HashSet<String> {
        s.split(' ')
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    };
    let sa = tokens(a);
    let sb = tokens(b);
    if sa.is_empty() || sb.is_empty() {
        return 0.0;
    }
    let shared = sa.intersection(&sb).count();
    shared as f64 / sa.len().min(sb.len()) as f64
}

/// Equal, containing (for long enough lines) or heavily overlapping lines.
#[must_use]
pub fn is_near_duplicate(a: &str, b: &str) -> bool {
    let na = normalize_for_compare(a);
    let nb = normalize_for_compare(b);
    if na.is_empty() || nb.is_empty() {
        return false;
    }
    if na == nb {
        return true;
    }
    if na.chars().count() >= CONTAINMENT_MIN_CHARS && nb.contains(&na) {
        return true;
    }
    if nb.chars().count() >= CONTAINMENT_MIN_CHARS && na.contains(&nb) {
        return true;
    }
    overlap_score(&na, &nb) >= NEAR_DUPLICATE_OVERLAP
}
