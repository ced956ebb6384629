use super::BULLET_COUNT;
use crate::utils::{is_greeting_sentence, is_near_duplicate};

/// Greedy keep-first pass: drops greetings and near-duplicates of lines
/// already kept, stopping at [`BULLET_COUNT`] survivors.
#[must_use]
pub fn dedupe_bullets<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for line in lines.iter().map(AsRef::as_ref) {
        if is_greeting_sentence(line) {
            continue;
        }
        if out.iter().any(|kept| is_near_duplicate(kept, line)) {
            continue;
        }
        out.push(line.to_string());
        if out.len() >= BULLET_COUNT {
            break;
        }
    }
    out
}
