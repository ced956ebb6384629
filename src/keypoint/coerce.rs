use regex::Regex;
use std::sync::LazyLock;

use super::{BULLET_COUNT, to_bullet_line};
use crate::utils::{normalize_spacing, to_sentence_candidates};

static BULLET_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-*]\s*").unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

static ORDINAL_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.\s*")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

fn strip_line_marker(line: &str) -> String {
    let without_bullet = BULLET_MARKER_RE.replace(line, "");
    ORDINAL_MARKER_RE.replace(&without_bullet, "").trim().to_string()
}

/// Converts model output into finished bullet lines.
///
/// Every non-empty line becomes a candidate once its `-`/`*` or `N.` marker
/// is stripped; all such lines are kept so later stages can see duplicates.
/// Text without usable lines is split into sentences instead, keeping at most
/// [`BULLET_COUNT`].
#[must_use]
pub fn normalize_bullet_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(strip_line_marker)
        .filter(|l| !l.is_empty())
        .collect();

    if !lines.is_empty() {
        return lines
            .iter()
            .map(|l| to_bullet_line(&normalize_spacing(l)))
            .collect();
    }

    to_sentence_candidates(text)
        .iter()
        .take(BULLET_COUNT)
        .map(|s| to_bullet_line(s))
        .collect()
}
