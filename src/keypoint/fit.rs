use super::BULLET_COUNT;
use crate::utils::{clamp_sentence, ensure_sentence_ending};

/// Lines are dropped from the end only while more than this many remain.
const MIN_LINES_BEFORE_CLAMPING: usize = 3;

/// Lines at or below this length are never shortened individually.
const SHRINKABLE_LINE_CHARS: usize = 28;

/// Characters removed from a line on each shrink step.
const SHRINK_STEP_CHARS: usize = 8;

/// Floor for the single-line fallback clamp.
const SINGLE_LINE_MIN_CHARS: usize = 24;

/// Renders lines as a `- `-prefixed, newline-joined block.
#[must_use]
pub fn format_bullets<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|l| format!("- {}", l.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rendered_len<S: AsRef<str>>(lines: &[S]) -> usize {
    format_bullets(lines).chars().count()
}

/// Shrinks bullet lines until the rendered block fits `max_chars`.
///
/// Drops trailing lines down to three, then shortens the first line longer
/// than 28 characters by 8 at a time, and finally falls back to the first
/// line alone. The fallback is returned even when it still exceeds the budget.
#[must_use]
pub fn fit_bullets_to_length<S: AsRef<str>>(lines: &[S], max_chars: usize) -> String {
    let mut chosen: Vec<String> = lines
        .iter()
        .take(BULLET_COUNT)
        .map(|l| l.as_ref().to_string())
        .collect();

    while chosen.len() > MIN_LINES_BEFORE_CLAMPING && rendered_len(&chosen) > max_chars {
        chosen.pop();
    }

    while rendered_len(&chosen) > max_chars {
        let Some(idx) = chosen
            .iter()
            .position(|l| l.chars().count() > SHRINKABLE_LINE_CHARS)
        else {
            break;
        };
        let target = chosen[idx].chars().count() - SHRINK_STEP_CHARS;
        chosen[idx] = ensure_sentence_ending(&clamp_sentence(&chosen[idx], target));
    }

    if rendered_len(&chosen) > max_chars {
        let limit = SINGLE_LINE_MIN_CHARS.max(max_chars.saturating_sub(SHRINK_STEP_CHARS));
        let first = chosen.first().map(String::as_str).unwrap_or_default();
        let single = ensure_sentence_ending(&clamp_sentence(first, limit));
        return format_bullets(&[single]);
    }

    format_bullets(&chosen)
}
