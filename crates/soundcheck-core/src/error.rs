use thiserror::Error;

/// Unified error type for the entire Soundcheck harness.
#[derive(Error, Debug)]
pub enum SoundcheckError {
    // ── Skill errors ───────────────────────────────────────────
    #[error("skill error: {0}")]
    Skill(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── LLM provider errors ────────────────────────────────────
    #[error("llm provider error: {0}")]
    Provider(String),

    /// The provider's transient "service overloaded" status (HTTP 529).
    /// The only error class the retry policy treats as retryable.
    #[error("llm provider overloaded")]
    Overloaded,

    // ── Judge errors ───────────────────────────────────────────
    #[error("judge returned invalid JSON: {0}")]
    JudgeOutput(String),
}

pub type Result<T> = std::result::Result<T, SoundcheckError>;

impl SoundcheckError {
    /// Whether this error is the provider's transient overload signal.
    pub fn is_overloaded(&self) -> bool {
        matches!(self, SoundcheckError::Overloaded)
    }
}
