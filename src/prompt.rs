//! Prompt text for the two generation calls.

use crate::core::models::SourceItem;
use crate::utils::normalize_spacing;

/// System message sent with every generation call.
pub const SYSTEM_PROMPT: &str =
    "당신은 기술 글 요약 편집자입니다. 사실 기반으로, 간결하고 읽기 좋은 문장만 작성합니다.";

/// Max length for any single field interpolated into a prompt
pub const MAX_PROMPT_FIELD_LEN: usize = 2000;

/// Placeholder for an empty prompt field
const MISSING_FIELD: &str = "N/A";

/// Remove control characters and hard-truncate a field before it goes into a prompt
#[must_use]
pub fn sanitize_prompt_field(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .take(MAX_PROMPT_FIELD_LEN)
        .collect()
}

fn field_or_missing(raw: &str) -> String {
    let sanitized = sanitize_prompt_field(raw);
    if sanitized.trim().is_empty() {
        MISSING_FIELD.to_string()
    } else {
        sanitized
    }
}

/// First call: a factual 4–7 sentence summary of the item.
#[must_use]
pub fn build_draft_prompt(item: &SourceItem, context: &str) -> String {
    [
        "다음 글의 핵심을 한국어로 정리하세요.".to_string(),
        "조건:".to_string(),
        "- 과장/추측 금지".to_string(),
        "- 제목 반복 금지".to_string(),
        "- 불필요한 인삿말 금지".to_string(),
        "- 핵심 사실 위주로 4~7문장".to_string(),
        String::new(),
        format!("[제목] {}", sanitize_prompt_field(&item.title)),
        format!("[요약원문] {}", field_or_missing(&item.description)),
        format!("[추가문맥] {}", field_or_missing(context)),
    ]
    .join("\n")
}

/// Second call: rewrite the draft as exactly five `- `-prefixed lines.
#[must_use]
pub fn build_refine_prompt(item: &SourceItem, draft: &str, context: &str) -> String {
    [
        "아래 텍스트를 카카오 알림용 핵심 요약으로 재작성하세요.".to_string(),
        "출력 규칙:".to_string(),
        "- 정확히 5줄".to_string(),
        "- 각 줄은 '- '로 시작".to_string(),
        "- 각 줄은 1문장, 18~55자".to_string(),
        "- 서로 중복 금지".to_string(),
        "- 인삿말/잡담 금지".to_string(),
        "- 문장 끝은 마침표".to_string(),
        "- 반드시 한국어".to_string(),
        "- 줄 외 다른 텍스트 금지".to_string(),
        String::new(),
        format!("[제목] {}", sanitize_prompt_field(&item.title)),
        format!("[초안] {}", sanitize_prompt_field(&normalize_spacing(draft))),
        format!("[보조문맥] {}", sanitize_prompt_field(&normalize_spacing(context))),
    ]
    .join("\n")
}
