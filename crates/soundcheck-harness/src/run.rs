//! # Smoke-Test Orchestrator
//!
//! Runs the full per-skill pipeline — extract criteria, review the
//! vulnerable sample, judge the review — for every skill under test (or a
//! single named one), strictly in sequence.
//!
//! Failure containment: configuration problems (missing document, missing
//! test case, no criteria) and provider errors are recorded as per-skill
//! failures and never abort the run, unless `fail_fast` is set.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use soundcheck_config::SmokeConfig;
use soundcheck_core::Result;
use soundcheck_llm::{LlmProvider, RetryPolicy};
use soundcheck_skills::{SkillLibrary, extract_criteria};

use crate::judge::{self, CriterionResult, Verdict};
use crate::reviewer;

/// Per-run flags, mirroring the CLI surface.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Test a single skill by name instead of the whole library.
    pub skill: Option<String>,
    /// Echo the full reviewer and judge responses as they arrive.
    pub verbose: bool,
    /// Stop iterating after the first failing skill.
    pub fail_fast: bool,
}

/// Outcome for one skill.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub skill: String,
    pub passed: bool,
    /// One-line reason shown in the report table.
    pub detail: String,
    /// Per-criterion verdicts; empty if the run failed before judging.
    pub criteria: Vec<CriterionResult>,
}

impl RunResult {
    /// A failure recorded before any verdict was produced.
    pub fn failure(skill: &str, detail: impl Into<String>) -> Self {
        Self {
            skill: skill.to_string(),
            passed: false,
            detail: detail.into(),
            criteria: Vec::new(),
        }
    }
}

/// Aggregate outcome of a run. Counts cover attempted skills only.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<RunResult>,
    pub pass_count: usize,
    pub fail_count: usize,
    /// True when `fail_fast` cut the run short.
    pub stopped_early: bool,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.fail_count == 0
    }
}

/// Drives the reviewer/judge pipeline across a skill library.
pub struct SmokeRunner {
    provider: Arc<dyn LlmProvider>,
    model: String,
    review_max_tokens: u32,
    judge_max_tokens: u32,
    retry: RetryPolicy,
    pacing: Duration,
}

impl SmokeRunner {
    pub fn new(provider: Arc<dyn LlmProvider>, smoke: &SmokeConfig) -> Self {
        Self {
            provider,
            model: smoke.model.clone(),
            review_max_tokens: smoke.review_max_tokens,
            judge_max_tokens: smoke.judge_max_tokens,
            retry: RetryPolicy::new(
                smoke.max_attempts,
                Duration::from_secs(smoke.backoff_base_secs),
            ),
            pacing: Duration::from_secs(smoke.pacing_secs),
        }
    }

    /// Run the pipeline for every selected skill, invoking `on_result` as
    /// each row completes so the caller can render the table incrementally.
    pub async fn run(
        &self,
        library: &SkillLibrary,
        options: &RunOptions,
        mut on_result: impl FnMut(&RunResult),
    ) -> RunSummary {
        let names: Vec<&str> = match &options.skill {
            Some(name) => vec![name.as_str()],
            None => library.names(),
        };

        info!(
            skills = names.len(),
            model = %self.model,
            provider = self.provider.name(),
            "starting smoke run"
        );

        let mut summary = RunSummary::default();
        for (i, name) in names.iter().enumerate() {
            // Pace between skills, not before the first and not within one.
            if i > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            let result = self.run_skill(library, name, options.verbose).await;
            on_result(&result);

            let failed = !result.passed;
            if result.passed {
                summary.pass_count += 1;
            } else {
                summary.fail_count += 1;
            }
            summary.results.push(result);

            if failed && options.fail_fast {
                summary.stopped_early = true;
                break;
            }
        }

        info!(
            passed = summary.pass_count,
            failed = summary.fail_count,
            stopped_early = summary.stopped_early,
            "smoke run finished"
        );
        summary
    }

    /// Run one skill end to end. Never returns an error: every failure mode
    /// becomes a failed [`RunResult`] with a descriptive detail line.
    async fn run_skill(&self, library: &SkillLibrary, name: &str, verbose: bool) -> RunResult {
        debug!(skill = name, "running smoke test");

        // Configuration gates fail the skill without spending model calls.
        let Some(doc) = library.get(name) else {
            return RunResult::failure(name, format!("No skill document found for '{name}'"));
        };
        let Some(test_case) = library.find_test_case(name) else {
            return RunResult::failure(name, format!("No test case found for '{name}'"));
        };
        let criteria = extract_criteria(&doc.raw);
        if criteria.is_empty() {
            return RunResult::failure(name, "No verification criteria found in SKILL.md");
        }
        let sample = match std::fs::read_to_string(&test_case) {
            Ok(code) => code,
            Err(e) => {
                return RunResult::failure(
                    name,
                    format!("Failed to read test case {}: {e}", test_case.display()),
                );
            }
        };

        match self
            .evaluate(name, &doc.raw, &criteria, &sample, verbose)
            .await
        {
            Ok(result) => result,
            // Provider errors (retry budget exhausted, auth, transport) are
            // contained here so the next skill still runs.
            Err(e) => RunResult::failure(name, format!("API error: {e}")),
        }
    }

    /// The two dependent model calls: the judge consumes the reviewer's text,
    /// so it is issued only after the review completes.
    async fn evaluate(
        &self,
        name: &str,
        skill_text: &str,
        criteria: &[String],
        sample: &str,
        verbose: bool,
    ) -> Result<RunResult> {
        let review_text = reviewer::review(
            self.provider.as_ref(),
            &self.retry,
            &self.model,
            self.review_max_tokens,
            skill_text,
            sample,
        )
        .await?;

        if verbose {
            println!("\n--- reviewer response for {name} ---");
            println!("{review_text}");
            println!("---");
        }

        let judge_text = judge::grade(
            self.provider.as_ref(),
            &self.retry,
            &self.model,
            self.judge_max_tokens,
            name,
            criteria,
            sample,
            &review_text,
        )
        .await?;

        if verbose {
            println!("\n--- judge response for {name} ---");
            println!("{judge_text}");
            println!("---");
        }

        // Malformed judge output is a failed result, not a provider error,
        // and is never retried.
        let verdict = match judge::parse_verdict(&judge_text) {
            Ok(verdict) => verdict,
            Err(e) => return Ok(RunResult::failure(name, e.to_string())),
        };

        Ok(self.score(name, verdict))
    }

    /// Turn a verdict into a result row. The judge's top-level `passed` is
    /// authoritative; disagreement with its own per-criterion list is logged
    /// and surfaced in the detail line rather than silently recomputed.
    fn score(&self, name: &str, verdict: Verdict) -> RunResult {
        let total = verdict.criteria.len();
        let failed = verdict.criteria.iter().filter(|c| !c.passed).count();

        let detail = if verdict.passed && failed > 0 {
            warn!(
                skill = name,
                failing = failed,
                "judge verdict disagrees with its own criteria results"
            );
            format!("judge reported pass with {failed} failing criteria")
        } else if !verdict.passed && failed == 0 && total > 0 {
            warn!(
                skill = name,
                criteria = total,
                "judge verdict disagrees with its own criteria results"
            );
            "judge reported failure despite no failing criteria".to_string()
        } else if total == 0 {
            // Judge omitted the per-criterion list entirely.
            if verdict.passed {
                "judge reported pass (no per-criterion results)".to_string()
            } else {
                "judge reported failure (no per-criterion results)".to_string()
            }
        } else if verdict.passed {
            format!("all {total} criteria passed")
        } else {
            format!("{failed} of {total} criteria failed")
        };

        RunResult {
            skill: name.to_string(),
            passed: verdict.passed,
            detail,
            criteria: verdict.criteria,
        }
    }
}
