//! Static authoring rules for skill documents.
//!
//! Every published skill must carry complete frontmatter, the five
//! standard sections, a word budget that keeps it cheap to inject as a
//! system prompt, standard vulnerability references, and a paired test
//! case. Violations are returned as human-readable strings for the
//! validation report.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::SkillDocument;
use crate::library::SkillLibrary;

/// Required top-level sections, in authoring order.
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "## What this checks",
    "## Vulnerable patterns",
    "## Fix immediately",
    "## Verification",
    "## References",
];

/// Maximum body word count (frontmatter excluded).
pub const MAX_WORDS: usize = 400;

static OWASP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(A\d{2}:\d{4}|LLM\d{2}:\d{4})").unwrap());
static CWE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"CWE-\d+").unwrap());

/// Check one skill document against the authoring rules.
/// Returns a list of violations; empty means the skill passes.
pub fn lint_skill(library: &SkillLibrary, doc: &SkillDocument) -> Vec<String> {
    let mut violations = Vec::new();

    // 1. Frontmatter: name and description present and non-empty
    if is_blank(&doc.frontmatter_name) {
        violations.push("Frontmatter: missing or empty 'name' field".to_string());
    }
    if is_blank(&doc.description) {
        violations.push("Frontmatter: missing or empty 'description' field".to_string());
    }

    // 2. No TODO placeholders
    if doc.raw.contains("TODO") {
        violations.push("Contains TODO placeholder(s)".to_string());
    }

    // 3. Word count within budget
    let word_count = doc.body().split_whitespace().count();
    if word_count > MAX_WORDS {
        violations.push(format!("Word count {word_count} exceeds {MAX_WORDS} limit"));
    }

    // 4. Required sections present
    for section in REQUIRED_SECTIONS {
        if !doc.raw.contains(section) {
            violations.push(format!("Missing required section: '{section}'"));
        }
    }

    // 5. At least one CWE reference
    if !CWE_PATTERN.is_match(&doc.raw) {
        violations.push("No CWE reference found (expected pattern: CWE-\\d+)".to_string());
    }

    // 6. OWASP identifier in title
    if !OWASP_PATTERN.is_match(&doc.raw) {
        violations
            .push("No OWASP identifier found in title (expected A##:#### or LLM##:####)".to_string());
    }

    // 7. Test case file exists
    if library.find_test_case(&doc.name).is_none() {
        violations.push(format!(
            "No test case found at {}/{}.*",
            library.test_cases_dir().display(),
            doc.name
        ));
    }

    violations
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map(str::trim).unwrap_or("").is_empty()
}
