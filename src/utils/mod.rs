//! Pure text helpers shared across the crate

pub mod filters;
pub mod text;

pub use filters::{is_greeting_sentence, is_near_duplicate, is_noise_sentence};
pub use text::{clamp_sentence, ensure_sentence_ending, normalize_spacing, to_sentence_candidates};
