#[cfg(test)]
mod tests {
    use soundcheck_core::SoundcheckError;
    use soundcheck_llm::mock::MockProvider;
    use soundcheck_llm::provider::{ChatMessage, LlmProvider, LlmRequest};
    use soundcheck_llm::retry::RetryPolicy;
    use std::time::Duration;

    fn make_request() -> LlmRequest {
        LlmRequest {
            model: "claude-haiku-4-5".to_string(),
            messages: vec![ChatMessage::user("Hello")],
            system: None,
            max_tokens: 100,
            temperature: 0.0,
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(5, Duration::from_millis(1))
    }

    // ── Retry + provider ───────────────────────────────────────

    #[tokio::test]
    async fn test_overload_then_success() {
        let provider = MockProvider::new("flaky")
            .with_overload()
            .with_overload()
            .with_response("third time lucky");
        let request = make_request();

        let resp = fast_policy()
            .run(
                || provider.complete(&request),
                SoundcheckError::is_overloaded,
            )
            .await
            .unwrap();

        assert_eq!(resp.text, "third time lucky");
        assert_eq!(provider.requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_persistent_overload_exhausts_budget() {
        let provider = MockProvider::new("down")
            .with_overload()
            .with_overload()
            .with_overload()
            .with_overload()
            .with_overload();
        let request = make_request();

        let result = fast_policy()
            .run(
                || provider.complete(&request),
                SoundcheckError::is_overloaded,
            )
            .await;

        assert!(matches!(result, Err(SoundcheckError::Overloaded)));
        assert_eq!(provider.requests.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_non_overload_error_is_not_retried() {
        let provider = MockProvider::new("broken")
            .with_error("HTTP 401: invalid x-api-key")
            .with_response("never reached");
        let request = make_request();

        let result = fast_policy()
            .run(
                || provider.complete(&request),
                SoundcheckError::is_overloaded,
            )
            .await;

        match result {
            Err(SoundcheckError::Provider(msg)) => assert!(msg.contains("401")),
            other => panic!("expected provider error, got {other:?}"),
        }
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_retried_requests_are_identical() {
        let provider = MockProvider::new("flaky")
            .with_overload()
            .with_response("ok");
        let request = make_request();

        fast_policy()
            .run(
                || provider.complete(&request),
                SoundcheckError::is_overloaded,
            )
            .await
            .unwrap();

        let recorded = provider.requests.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].messages[0].content, recorded[1].messages[0].content);
        assert_eq!(recorded[0].model, recorded[1].model);
    }
}
