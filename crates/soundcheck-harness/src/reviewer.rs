//! The reviewer call — asks a model to audit a vulnerable sample with the
//! skill document injected as system-level guidance.

use soundcheck_core::{Result, SoundcheckError};
use soundcheck_llm::{ChatMessage, LlmProvider, LlmRequest, RetryPolicy};

/// Instruction prepended to the vulnerable sample in the user message.
pub const REVIEW_INSTRUCTION: &str = "Identify all security vulnerabilities in this code. \
Be specific about vulnerability types, and propose a concrete fix for each issue you find.";

/// Run the review and return the model's raw free-text output.
///
/// The full skill document becomes the system prompt, so detection quality
/// reflects the skill's guidance rather than the model's baseline knowledge.
pub async fn review(
    provider: &dyn LlmProvider,
    retry: &RetryPolicy,
    model: &str,
    max_tokens: u32,
    skill_text: &str,
    sample: &str,
) -> Result<String> {
    let request = LlmRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(format!(
            "{REVIEW_INSTRUCTION}\n\n```\n{sample}\n```"
        ))],
        system: Some(skill_text.to_string()),
        max_tokens,
        temperature: 0.0,
    };

    let response = retry
        .run(|| provider.complete(&request), SoundcheckError::is_overloaded)
        .await?;
    Ok(response.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundcheck_llm::MockProvider;

    #[tokio::test]
    async fn skill_text_becomes_system_prompt() {
        let provider = MockProvider::new("mock").with_response("The code concatenates SQL.");
        let retry = RetryPolicy::default();

        let text = review(
            &provider,
            &retry,
            "claude-haiku-4-5",
            1024,
            "# SQL Injection skill",
            "cursor.execute(f\"SELECT * FROM users WHERE id = {user_id}\")",
        )
        .await
        .unwrap();

        assert_eq!(text, "The code concatenates SQL.");
        let requests = provider.recorded_requests();
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some("# SQL Injection skill"));
        assert!(requests[0].messages[0].content.contains("cursor.execute"));
        assert!(requests[0].messages[0].content.starts_with(REVIEW_INSTRUCTION));
        assert_eq!(requests[0].max_tokens, 1024);
    }
}
