//! Console rendering for smoke-run results: the summary table, per-criterion
//! failure detail, and the aggregate count line. Pure string builders so the
//! layout is testable without capturing stdout.

use crate::run::{RunResult, RunSummary};

/// Width of the horizontal rules framing the table.
pub const RULE_WIDTH: usize = 72;

pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Skill column width: longest name plus two spaces of gutter.
pub fn column_width<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
    names.into_iter().map(str::len).max().unwrap_or(0) + 2
}

/// The run banner, column headings, and opening rule.
pub fn render_header(skill_count: usize, model: &str, col_width: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nSoundcheck Smoke Tests — {skill_count} skill(s) — model: {model}\n\n"
    ));
    out.push_str(&format!("{:<col_width$} {:<8}  Detail\n", "Skill", "Status"));
    out.push_str(&rule());
    out
}

/// One table row: name, PASS/FAIL, one-line detail.
pub fn render_row(result: &RunResult, col_width: usize) -> String {
    let status = if result.passed { "PASS" } else { "FAIL" };
    format!("{:<col_width$} {status:<8}  {}", result.skill, result.detail)
}

/// Per-criterion detail for a failing skill, or `None` when there is nothing
/// to show (the skill passed, or it failed before any verdict was produced).
pub fn render_failures(result: &RunResult) -> Option<String> {
    if result.passed {
        return None;
    }
    let failing: Vec<_> = result.criteria.iter().filter(|c| !c.passed).collect();
    if failing.is_empty() {
        return None;
    }

    let mut out = format!("\nFailed criteria for '{}':", result.skill);
    for criterion in failing {
        out.push_str(&format!("\n  ✗ {}", criterion.criterion));
        if !criterion.evidence.is_empty() {
            out.push_str(&format!("\n      evidence: {}", criterion.evidence));
        }
    }
    Some(out)
}

/// The aggregate count line printed after the closing rule.
pub fn render_summary(summary: &RunSummary) -> String {
    format!(
        "\nResults: {} passed, {} failed\n",
        summary.pass_count, summary.fail_count
    )
}
