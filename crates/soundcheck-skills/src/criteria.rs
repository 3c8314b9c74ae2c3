//! Extraction of verification criteria from skill documents.

/// Extract the checklist items under the `## Verification` heading.
///
/// The section runs from that heading to the next `## ` heading or the
/// end of the document. Each unchecked checklist line (`- [ ] text`)
/// contributes one criterion: the text after the box, trimmed, in
/// document order. Checked boxes, malformed lines, and prose are
/// ignored. A document without the heading yields an empty list — the
/// caller decides what that means.
pub fn extract_criteria(document: &str) -> Vec<String> {
    let mut criteria = Vec::new();
    let mut in_section = false;

    for line in document.lines() {
        if !in_section {
            if line.trim_end() == "## Verification" {
                in_section = true;
            }
            continue;
        }
        if line.starts_with("## ") {
            break;
        }
        if let Some(rest) = line.trim_start().strip_prefix("- [ ] ") {
            let text = rest.trim();
            if !text.is_empty() {
                criteria.push(text.to_string());
            }
        }
    }

    criteria
}
