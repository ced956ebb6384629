//! Spacing cleanup, sentence splitting and the clamp/terminate primitives
//! shared by every stage of the key point pipeline.

use super::filters::is_noise_sentence;

/// Characters that end a sentence.
pub const SENTENCE_ENDINGS: &[char] = &['.', '!', '?', '。'];

/// Marker appended to a clamped line.
pub const ELLIPSIS: char = '…';

/// Separators that split sentence candidates regardless of punctuation.
const FRAGMENT_SEPARATORS: &[char] = &['·', '/', '|'];

/// Fragments shorter than this many characters are not sentence candidates.
pub const MIN_SENTENCE_CHARS: usize = 8;

/// A clamp cuts at the last space only when it lies past this share of the limit.
pub const CLAMP_WORD_BOUNDARY_RATIO: f64 = 0.55;

type CharClass = fn(char) -> bool;

fn is_hangul(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

fn is_sentence_end(c: char) -> bool {
    SENTENCE_ENDINGS.contains(&c)
}

fn is_not_whitespace(c: char) -> bool {
    !c.is_whitespace()
}

fn is_latin_upper(c: char) -> bool {
    c.is_ascii_uppercase()
}

fn is_latin_lower(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// Adjacent character pairs that get a space inserted between them, in order.
const SPACING_RULES: &[(CharClass, CharClass)] = &[
    (is_sentence_end, is_not_whitespace),
    (is_hangul, is_latin_upper),
    (is_latin_lower, is_hangul),
];

/// Collapses whitespace, separates sentences and splits Hangul/Latin runs.
///
/// Total and idempotent; blank input yields an empty string.
#[must_use]
pub fn normalize_spacing(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::with_capacity(collapsed.len() + 8);
    let mut prev: Option<char> = None;
    for c in collapsed.chars() {
        if let Some(p) = prev
            && SPACING_RULES.iter().any(|(left, right)| left(p) && right(c))
        {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }

    out.trim().to_string()
}

/// Removes a bare trailing ordinal such as `... 2.` left over from lists.
fn strip_trailing_ordinal(text: &str) -> &str {
    let trimmed = text.trim_end();
    let Some(body) = trimmed.strip_suffix('.') else {
        return trimmed;
    };
    let without_digits = body.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == body.len() {
        return trimmed;
    }
    let at_word_boundary = without_digits
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '_'));
    if at_word_boundary {
        without_digits.trim_end()
    } else {
        trimmed
    }
}

/// Splits text into sentence candidates, preserving order.
///
/// Splits after sentence punctuation followed by whitespace and on `·`, `/`
/// and `|`. Fragments under [`MIN_SENTENCE_CHARS`] and template noise are
/// dropped.
#[must_use]
pub fn to_sentence_candidates(text: &str) -> Vec<String> {
    let normalized = normalize_spacing(text);
    let cleaned = strip_trailing_ordinal(&normalized).trim();

    let mut fragments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in cleaned.chars() {
        if FRAGMENT_SEPARATORS.contains(&c)
            || (c.is_whitespace() && prev.is_some_and(is_sentence_end))
        {
            fragments.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
        prev = Some(c);
    }
    fragments.push(current);

    fragments
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| f.chars().count() >= MIN_SENTENCE_CHARS)
        .filter(|f| !is_noise_sentence(f))
        .collect()
}

/// Truncates `text` to at most `max_len` characters plus an ellipsis,
/// preferring a word boundary in the back part of the allowed prefix.
#[must_use]
pub fn clamp_sentence(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let hard: String = text.chars().take(max_len).collect();
    let boundary = (max_len as f64 * CLAMP_WORD_BOUNDARY_RATIO).floor() as usize;
    let cut = match hard.rfind(' ') {
        Some(byte_idx) if hard[..byte_idx].chars().count() > boundary => &hard[..byte_idx],
        _ => hard.as_str(),
    };

    format!("{}{ELLIPSIS}", cut.trim())
}

/// Appends a period unless the text already ends a sentence or was clamped.
#[must_use]
pub fn ensure_sentence_ending(text: &str) -> String {
    let t = text.trim();
    if t.is_empty() || t.ends_with(SENTENCE_ENDINGS) || t.ends_with(ELLIPSIS) {
        return t.to_string();
    }
    format!("{t}.")
}
