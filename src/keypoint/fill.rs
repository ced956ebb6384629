use super::{BULLET_COUNT, to_bullet_line};
use crate::utils::{is_near_duplicate, to_sentence_candidates};

/// Last-resort line used when every source is exhausted. Repeats verbatim,
/// so a padded set may contain identical lines.
pub const GENERIC_FILLER: &str = "핵심 내용을 요약해 전달합니다.";

/// Tops `lines` up to exactly [`BULLET_COUNT`] entries.
///
/// Sources are consulted in the order given; each contributes sentence
/// candidates that are not near-duplicates of lines already present.
#[must_use]
pub fn fill_missing_bullets<S: AsRef<str>>(lines: &[S], sources: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
    if out.len() >= BULLET_COUNT {
        out.truncate(BULLET_COUNT);
        return out;
    }

    for source in sources {
        for sentence in to_sentence_candidates(source) {
            let line = to_bullet_line(&sentence);
            if out.iter().any(|existing| is_near_duplicate(existing, &line)) {
                continue;
            }
            out.push(line);
            if out.len() >= BULLET_COUNT {
                return out;
            }
        }
    }

    while out.len() < BULLET_COUNT {
        out.push(GENERIC_FILLER.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_input() {
        let lines: Vec<String> = (0..7).map(|i| format!("line {i}.")).collect();
        let out = fill_missing_bullets(&lines, &[]);
        assert_eq!(out.len(), 5);
        assert_eq!(out[4], "line 4.");
    }

    #[test]
    fn draws_from_sources_in_order_skipping_duplicates() {
        let lines = ["모델 성능이 크게 향상되었습니다."];
        let context = "모델 성능이 크게 향상되었습니다. 비용도 절감되었다고 합니다.";
        let description = "개발자는 바로 API를 사용할 수 있습니다. 가격 정책도 공개되었습니다. 문서도 함께 나왔습니다.";
        let out = fill_missing_bullets(&lines, &[context, description]);
        assert_eq!(
            out,
            vec![
                "모델 성능이 크게 향상되었습니다.",
                "비용도 절감되었다고 합니다.",
                "개발자는 바로 API를 사용할 수 있습니다.",
                "가격 정책도 공개되었습니다.",
                "문서도 함께 나왔습니다.",
            ]
        );
    }

    #[test]
    fn pads_with_generic_filler() {
        let out = fill_missing_bullets::<&str>(&[], &["", "짧다."]);
        assert_eq!(out, vec![GENERIC_FILLER; 5]);
    }
}
