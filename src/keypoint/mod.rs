//! Turns a news item into exactly five short bullet lines that fit a
//! character budget, with or without a generative model.
//!
//! Stages run in this order on the generation path:
//! [`coerce`] → [`dedup`] → [`fill`] → [`fit`]. The extraction path skips
//! coercion: sentence candidates minus greetings go to [`fill`] with the
//! description as the only source, then to [`fit`]. [`pipeline`] wires both
//! paths together.

pub mod coerce;
pub mod dedup;
pub mod fill;
pub mod fit;
pub mod pipeline;

use crate::utils::{clamp_sentence, ensure_sentence_ending};

pub use coerce::normalize_bullet_lines;
pub use dedup::dedupe_bullets;
pub use fill::fill_missing_bullets;
pub use fit::{fit_bullets_to_length, format_bullets};
pub use pipeline::build_key_point;

/// Number of bullet lines a key point carries before fitting.
pub const BULLET_COUNT: usize = 5;

/// Character limit for a single bullet line before fitting.
pub const BULLET_MAX_CHARS: usize = 55;

/// Finishes a raw fragment as a bullet line: clamped and sentence-terminated.
#[must_use]
pub fn to_bullet_line(fragment: &str) -> String {
    ensure_sentence_ending(&clamp_sentence(fragment, BULLET_MAX_CHARS))
}
