use tracing::{info, warn};

use super::{
    BULLET_COUNT, dedupe_bullets, fill_missing_bullets, fit_bullets_to_length,
    normalize_bullet_lines, to_bullet_line,
};
use crate::ai::{GenerationRequest, TextGenerator};
use crate::core::models::{GenerationOptions, SourceItem};
use crate::errors::DigestError;
use crate::prompt::{build_draft_prompt, build_refine_prompt};
use crate::utils::{is_greeting_sentence, normalize_spacing, to_sentence_candidates};

/// Outcome of one generation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    Ready(T),
    UseFallback,
}

/// Normalized text of the first non-blank field among context, description and title.
#[must_use]
pub fn pick_best_context(item: &SourceItem) -> String {
    [&item.context, &item.description, &item.title]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .map(|s| normalize_spacing(s))
        .unwrap_or_default()
}

/// Deterministic extractive key point, used without a model or when the
/// model returns nothing. Short extractions are topped up from the
/// description and then the generic filler line.
#[must_use]
pub fn fallback_key_point(item: &SourceItem, max_chars_per_item: usize) -> String {
    let context = pick_best_context(item);
    let lines: Vec<String> = to_sentence_candidates(&context)
        .into_iter()
        .filter(|s| !is_greeting_sentence(s))
        .take(BULLET_COUNT)
        .map(|s| to_bullet_line(&s))
        .collect();

    let filled = fill_missing_bullets(&lines, &[item.description.as_str()]);
    fit_bullets_to_length(&filled, max_chars_per_item)
}

/// Coerces refined model output into a fitted five-line block, topping up
/// from `context` and then `description`.
#[must_use]
pub fn shape_model_output(
    refined: &str,
    context: &str,
    description: &str,
    max_chars_per_item: usize,
) -> String {
    let bullets = normalize_bullet_lines(refined);
    let unique = dedupe_bullets(&bullets);
    let filled = fill_missing_bullets(&unique, &[context, description]);
    fit_bullets_to_length(&filled, max_chars_per_item)
}

async fn request_text<G>(
    generator: &G,
    options: &GenerationOptions,
    prompt: String,
    stage: &str,
) -> Result<Step<String>, DigestError>
where
    G: TextGenerator + ?Sized,
{
    let request = GenerationRequest {
        api_key: options.api_key.clone(),
        model: options.model.clone(),
        prompt,
    };
    let text = generator.generate(&request).await?;
    let text = text.trim();
    if text.is_empty() {
        warn!("{} call returned no text; using extractive key point", stage);
        return Ok(Step::UseFallback);
    }
    Ok(Step::Ready(text.to_string()))
}

/// Builds the rendered key point block for one item.
///
/// Without generation this is [`fallback_key_point`]. With generation it
/// drafts a summary, refines it into five lines, and shapes the result. An
/// empty response at either stage falls back to extraction.
///
/// # Errors
///
/// Propagates transport and status errors from the generator.
pub async fn build_key_point<G>(
    item: &SourceItem,
    options: &GenerationOptions,
    generator: &G,
) -> Result<String, DigestError>
where
    G: TextGenerator + ?Sized,
{
    let max_chars = options.max_chars_per_item;
    if !options.generation_enabled() {
        info!("Generation disabled; extracting key point for '{}'", item.title);
        return Ok(fallback_key_point(item, max_chars));
    }

    let context = pick_best_context(item);

    let draft_prompt = build_draft_prompt(item, &context);
    let Step::Ready(draft) = request_text(generator, options, draft_prompt, "draft").await?
    else {
        return Ok(fallback_key_point(item, max_chars));
    };

    let refine_prompt = build_refine_prompt(item, &draft, &context);
    let Step::Ready(refined) = request_text(generator, options, refine_prompt, "refine").await?
    else {
        return Ok(fallback_key_point(item, max_chars));
    };

    Ok(shape_model_output(
        &refined,
        &context,
        &item.description,
        max_chars,
    ))
}
