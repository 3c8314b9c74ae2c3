//! # soundcheck-llm
//!
//! Abstraction layer over LLM providers. Ships the Anthropic adapter the
//! harness calls in production, a retry policy for its transient overload
//! signal, and a mock provider for tests.

pub mod anthropic;
pub mod mock;
pub mod provider;
pub mod retry;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use provider::{ChatMessage, LlmProvider, LlmRequest, LlmResponse, Role, Usage};
pub use retry::RetryPolicy;
