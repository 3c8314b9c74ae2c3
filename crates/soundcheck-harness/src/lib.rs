//! # soundcheck-harness
//!
//! The LLM-as-judge smoke-test pipeline. For each skill under test:
//!
//! 1. The skill's `## Verification` checklist is extracted as grading criteria
//! 2. A **reviewer** call audits the paired vulnerable sample with the skill
//!    document as system guidance
//! 3. A **judge** call grades the review against the criteria and returns a
//!    structured verdict
//! 4. The orchestrator aggregates per-skill results into a console report
//!
//! The two model calls are strictly sequential (the judge consumes the
//! reviewer's output) and both go through the provider retry policy, so a
//! transiently overloaded backend does not corrupt the evaluation.

pub mod judge;
pub mod report;
pub mod reviewer;
pub mod run;

pub use judge::{CriterionResult, Verdict, parse_verdict};
pub use run::{RunOptions, RunResult, RunSummary, SmokeRunner};
