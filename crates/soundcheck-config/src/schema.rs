use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration — maps to `soundcheck.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundcheckConfig {
    pub paths: PathsConfig,
    pub smoke: SmokeConfig,
    pub services: ServicesConfig,
    pub logging: LoggingConfig,
}

// ── Paths ──────────────────────────────────────────────────────

/// Where the skill library lives. Relative paths resolve against the
/// working directory, so running from a skill repository checkout works
/// without any configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory containing one `<skill>/SKILL.md` per skill.
    pub skills_dir: PathBuf,
    /// Directory of vulnerable samples; a sample pairs with a skill when
    /// its file stem equals the skill name.
    pub test_cases_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            skills_dir: PathBuf::from("skills"),
            test_cases_dir: PathBuf::from("docs/test-cases"),
        }
    }
}

// ── Smoke ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    /// Model used for both the reviewer and the judge call.
    pub model: String,
    /// Maximum tokens the reviewer may generate.
    pub review_max_tokens: u32,
    /// Maximum tokens the judge may generate.
    pub judge_max_tokens: u32,
    /// Seconds to pause between consecutive skills (rate-limit pacing).
    pub pacing_secs: u64,
    /// Total attempts per model call, counting the first.
    pub max_attempts: u32,
    /// Backoff before the second attempt, in seconds; doubles per retry.
    pub backoff_base_secs: u64,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            model: "claude-haiku-4-5".into(),
            review_max_tokens: 1024,
            judge_max_tokens: 1024,
            pacing_secs: 1,
            max_attempts: 5,
            backoff_base_secs: 1,
        }
    }
}

// ── Services ───────────────────────────────────────────────────

/// External service API keys and configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Anthropic API key.
    /// Can also be set via ANTHROPIC_API_KEY environment variable.
    /// Config file takes priority over environment variable.
    pub anthropic_api_key: Option<String>,
    /// Override for the Anthropic API base URL (proxies, test servers).
    pub anthropic_base_url: Option<String>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            anthropic_base_url: None,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Default for root ───────────────────────────────────────────

impl Default for SoundcheckConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            smoke: SmokeConfig::default(),
            services: ServicesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
            WarningSeverity::Info => "💡",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl SoundcheckConfig {
    /// Validate the config and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Model ───
        if self.smoke.model.is_empty() {
            warnings.push(ConfigWarning {
                field: "smoke.model".into(),
                message: "model is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'claude-haiku-4-5'".into()),
            });
        }

        // ── Token budgets ───
        if self.smoke.review_max_tokens == 0 {
            warnings.push(ConfigWarning {
                field: "smoke.review_max_tokens".into(),
                message: "review_max_tokens is 0 — reviewer can't produce output".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 1024".into()),
            });
        }
        if self.smoke.judge_max_tokens == 0 {
            warnings.push(ConfigWarning {
                field: "smoke.judge_max_tokens".into(),
                message: "judge_max_tokens is 0 — judge can't produce output".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 1024".into()),
            });
        }

        // ── Retry budget ───
        if self.smoke.max_attempts == 0 {
            warnings.push(ConfigWarning {
                field: "smoke.max_attempts".into(),
                message: "max_attempts is 0 — no model call would ever be made".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 5".into()),
            });
        }

        // ── Pacing ───
        if self.smoke.pacing_secs > 60 {
            warnings.push(ConfigWarning {
                field: "smoke.pacing_secs".into(),
                message: format!("{}s between skills is unusually long", self.smoke.pacing_secs),
                severity: WarningSeverity::Warning,
                hint: Some("1s is enough to stay under the rate limit".into()),
            });
        }

        // ── API key ───
        if self.services.anthropic_api_key.is_none() {
            warnings.push(ConfigWarning {
                field: "services.anthropic_api_key".into(),
                message: "no Anthropic API key configured".into(),
                severity: WarningSeverity::Info,
                hint: Some("Set ANTHROPIC_API_KEY or services.anthropic_api_key before running smoke tests".into()),
            });
        }

        // ── Logging format ───
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        // ── Logging level ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        // Check for hard errors
        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}
