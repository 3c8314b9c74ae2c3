//! The judge call — a second, independently-prompted model invocation that
//! grades the reviewer's output against the skill's verification criteria
//! and returns a structured [`Verdict`].

use serde::{Deserialize, Serialize};
use soundcheck_core::{Result, SoundcheckError};
use soundcheck_llm::{ChatMessage, LlmProvider, LlmRequest, RetryPolicy};

/// System prompt for the judge role.
pub const JUDGE_SYSTEM: &str = "You are a strict but fair evaluator of security code reviews. \
A criterion counts as satisfied only when the review clearly demonstrates the required \
behavior. Mentioning a topic without actually exhibiting the behavior is not enough.";

/// The judge's structured output.
///
/// The top-level `passed` flag is the judge's own claim and is authoritative
/// even when it disagrees with the per-criterion list. The runner logs the
/// disagreement but does not recompute the flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Verdict {
    pub passed: bool,
    pub criteria: Vec<CriterionResult>,
}

/// The judge's ruling on a single verification criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: String,
    pub passed: bool,
    /// Fragment of the review supporting the ruling; may be empty.
    #[serde(default)]
    pub evidence: String,
}

/// Run the judge and return its raw response text.
///
/// Kept separate from [`parse_verdict`] so verbose mode can echo the raw
/// text even when parsing fails.
#[allow(clippy::too_many_arguments)]
pub async fn grade(
    provider: &dyn LlmProvider,
    retry: &RetryPolicy,
    model: &str,
    max_tokens: u32,
    skill_name: &str,
    criteria: &[String],
    sample: &str,
    review: &str,
) -> Result<String> {
    let request = LlmRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(build_judge_prompt(
            skill_name, criteria, sample, review,
        ))],
        system: Some(JUDGE_SYSTEM.to_string()),
        max_tokens,
        temperature: 0.0,
    };

    let response = retry
        .run(|| provider.complete(&request), SoundcheckError::is_overloaded)
        .await?;
    Ok(response.text)
}

fn build_judge_prompt(skill_name: &str, criteria: &[String], sample: &str, review: &str) -> String {
    let mut numbered = String::new();
    for (i, criterion) in criteria.iter().enumerate() {
        numbered.push_str(&format!("{}. {criterion}\n", i + 1));
    }

    format!(
        "A security review of a vulnerable code sample was produced using the \
'{skill_name}' skill. Grade the review against each verification criterion below.\n\n\
Verification criteria:\n{numbered}\n\
Vulnerable sample:\n```\n{sample}\n```\n\n\
Review under evaluation:\n```\n{review}\n```\n\n\
Respond with ONLY a JSON object and no other text, shaped exactly as:\n\
{{\"passed\": bool, \"criteria\": [{{\"criterion\": string, \"passed\": bool, \
\"evidence\": string}}, ...]}}\n\n\
Copy each criterion string verbatim. Set the top-level \"passed\" to true only if every \
criterion passed. For each criterion, quote the shortest fragment of the review that \
satisfies it as \"evidence\", or state briefly why it fails."
    )
}

/// Parse the judge's raw response into a [`Verdict`].
///
/// The model is told to emit bare JSON, but a surrounding markdown code
/// fence is tolerated; for unfenced replies with surrounding prose, the
/// first top-level `{...}` span is used as a fallback. A missing `passed`
/// key defaults to false and a missing `criteria` key to an empty list.
pub fn parse_verdict(raw: &str) -> Result<Verdict> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with("```") {
        trimmed
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
    } else {
        first_json_object(trimmed).unwrap_or(trimmed)
    };

    serde_json::from_str(candidate).map_err(|e| {
        let snippet: String = trimmed.chars().take(120).collect();
        SoundcheckError::JudgeOutput(format!("{e} (response began: {snippet:?})"))
    })
}

/// Find the first balanced top-level `{...}` span, ignoring braces inside
/// JSON string literals.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundcheck_llm::MockProvider;

    const BARE: &str = r#"{"passed": true, "criteria": [{"criterion": "Names the flaw", "passed": true, "evidence": "SQL injection in line 3"}]}"#;

    #[test]
    fn fenced_and_bare_json_decode_identically() {
        let fenced = format!("```json\n{BARE}\n```");
        let from_fenced = parse_verdict(&fenced).unwrap();
        let from_bare = parse_verdict(BARE).unwrap();

        assert_eq!(from_fenced.passed, from_bare.passed);
        assert_eq!(from_fenced.criteria.len(), 1);
        assert_eq!(from_fenced.criteria[0].criterion, "Names the flaw");
    }

    #[test]
    fn plain_fence_without_language_tag_is_stripped() {
        let fenced = format!("```\n{BARE}\n```");
        assert!(parse_verdict(&fenced).unwrap().passed);
    }

    #[test]
    fn prose_wrapped_object_uses_first_json_span() {
        let wrapped = format!("Here is my assessment:\n\n{BARE}\n\nLet me know if you need more.");
        let verdict = parse_verdict(&wrapped).unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.criteria.len(), 1);
    }

    #[test]
    fn braces_inside_strings_do_not_truncate_the_span() {
        let tricky = r#"note: {"passed": false, "criteria": [{"criterion": "Shows a fix {example}", "passed": false, "evidence": "review said \"use {} placeholders\""}]} trailing"#;
        let verdict = parse_verdict(tricky).unwrap();
        assert_eq!(verdict.criteria[0].criterion, "Shows a fix {example}");
    }

    #[test]
    fn missing_passed_defaults_to_false() {
        let verdict = parse_verdict(r#"{"criteria": []}"#).unwrap();
        assert!(!verdict.passed);
    }

    #[test]
    fn missing_criteria_defaults_to_empty() {
        let verdict = parse_verdict(r#"{"passed": true}"#).unwrap();
        assert!(verdict.passed);
        assert!(verdict.criteria.is_empty());
    }

    #[test]
    fn missing_evidence_defaults_to_empty_string() {
        let verdict =
            parse_verdict(r#"{"passed": true, "criteria": [{"criterion": "x", "passed": true}]}"#)
                .unwrap();
        assert_eq!(verdict.criteria[0].evidence, "");
    }

    #[test]
    fn invalid_json_is_a_judge_output_error() {
        let err = parse_verdict("I could not evaluate this review.").unwrap_err();
        assert!(err.to_string().starts_with("judge returned invalid JSON"));
    }

    #[test]
    fn wrong_field_type_is_a_judge_output_error() {
        let err = parse_verdict(r#"{"passed": "yes", "criteria": []}"#).unwrap_err();
        assert!(err.to_string().starts_with("judge returned invalid JSON"));
    }

    #[tokio::test]
    async fn grade_sends_criteria_sample_and_review() {
        let provider = MockProvider::new("mock").with_response(BARE);
        let retry = RetryPolicy::default();
        let criteria = vec![
            "Identifies the injectable query".to_string(),
            "Proposes parameterized queries".to_string(),
        ];

        let raw = grade(
            &provider,
            &retry,
            "claude-haiku-4-5",
            1024,
            "injection",
            &criteria,
            "cursor.execute(query)",
            "The query is injectable; use parameterized queries.",
        )
        .await
        .unwrap();
        assert_eq!(raw, BARE);

        let requests = provider.recorded_requests();
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some(JUDGE_SYSTEM));
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("1. Identifies the injectable query"));
        assert!(prompt.contains("2. Proposes parameterized queries"));
        assert!(prompt.contains("cursor.execute(query)"));
        assert!(prompt.contains("use parameterized queries"));
    }
}
