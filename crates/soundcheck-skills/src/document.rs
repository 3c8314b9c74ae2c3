use std::path::{Path, PathBuf};

/// A skill document loaded from a SKILL.md file.
///
/// Skills are Markdown documents with YAML frontmatter that teach a
/// reviewer what to look for. The harness keeps the raw text: the
/// reviewer call consumes the whole document verbatim, and the lint
/// rules need to see everything the author wrote.
#[derive(Debug, Clone)]
pub struct SkillDocument {
    /// Skill name — the directory the SKILL.md lives in. Test cases are
    /// paired by this name, not by the frontmatter.
    pub name: String,
    /// `name:` field from the frontmatter, when present.
    pub frontmatter_name: Option<String>,
    /// `description:` field from the frontmatter, when present.
    pub description: Option<String>,
    /// Full document text, frontmatter included.
    pub raw: String,
    /// Path to the SKILL.md file.
    pub path: PathBuf,
}

impl SkillDocument {
    /// Read and parse a SKILL.md file.
    pub fn from_file(name: &str, path: &Path) -> soundcheck_core::Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            soundcheck_core::SoundcheckError::Skill(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::parse(name, &raw, path.to_path_buf()))
    }

    /// Parse SKILL.md content with known path info.
    ///
    /// Missing or malformed frontmatter is not an error at this level:
    /// the lint rules report it, and the smoke pipeline doesn't care.
    pub fn parse(name: &str, raw: &str, path: PathBuf) -> Self {
        let (frontmatter_name, description) = parse_frontmatter(raw);
        Self {
            name: name.to_string(),
            frontmatter_name,
            description,
            raw: raw.to_string(),
            path,
        }
    }

    /// Document body with the frontmatter block removed.
    pub fn body(&self) -> &str {
        match split_frontmatter(&self.raw) {
            Some((_, body)) => body,
            None => &self.raw,
        }
    }
}

/// Split a document into its frontmatter block and body.
/// Returns `None` when the document does not open with `---` or never
/// closes the block.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with("---") {
        return None;
    }
    let after_first = &content[3..];
    let end_pos = after_first.find("\n---")?;
    Some((after_first[..end_pos].trim(), &after_first[end_pos + 4..]))
}

/// Pull `name:` and `description:` out of the frontmatter, if any.
/// Values may continue across indented lines, matching how skill authors
/// wrap long descriptions.
fn parse_frontmatter(content: &str) -> (Option<String>, Option<String>) {
    let Some((block, _)) = split_frontmatter(content) else {
        return (None, None);
    };

    fn flush(
        entry: Option<(String, Vec<String>)>,
        name: &mut Option<String>,
        description: &mut Option<String>,
    ) {
        if let Some((key, lines)) = entry {
            let value = lines
                .iter()
                .filter(|l| !l.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            match key.as_str() {
                "name" => *name = Some(unquote(&value)),
                "description" => *description = Some(unquote(&value)),
                _ => {}
            }
        }
    }

    let mut name = None;
    let mut description = None;
    let mut current: Option<(String, Vec<String>)> = None;

    for line in block.lines() {
        let starts_key = line
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace())
            && line.contains(':');

        if starts_key {
            flush(current.take(), &mut name, &mut description);
            if let Some((key, value)) = line.split_once(':') {
                current = Some((key.trim().to_string(), vec![value.trim().to_string()]));
            }
        } else if let Some((_, ref mut lines)) = current {
            lines.push(line.trim().to_string());
        }
    }
    flush(current.take(), &mut name, &mut description);

    (name, description)
}

/// Remove surrounding quotes from a YAML value.
fn unquote(s: &str) -> String {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skill_md() {
        let content = r#"---
name: injection
description: Detect injection flaws in code under review
---

# Injection (A03:2021)

## What this checks
SQL, command, and template injection.
"#;
        let doc = SkillDocument::parse(
            "injection",
            content,
            PathBuf::from("/skills/injection/SKILL.md"),
        );

        assert_eq!(doc.name, "injection");
        assert_eq!(doc.frontmatter_name.as_deref(), Some("injection"));
        assert_eq!(
            doc.description.as_deref(),
            Some("Detect injection flaws in code under review")
        );
        assert!(doc.raw.contains("# Injection"));
        assert!(doc.body().contains("## What this checks"));
        assert!(!doc.body().contains("description:"));
    }

    #[test]
    fn parse_multiline_description() {
        let content = "---\nname: crypto\ndescription: Spot weak hashing,\n  hardcoded keys, and\n  bad randomness\n---\n\nBody.";
        let doc = SkillDocument::parse("crypto", content, PathBuf::from("/tmp/SKILL.md"));

        assert_eq!(
            doc.description.as_deref(),
            Some("Spot weak hashing, hardcoded keys, and bad randomness")
        );
    }

    #[test]
    fn parse_quoted_values() {
        let content = "---\nname: \"quoted\"\ndescription: 'Single quoted'\n---\n\nBody.";
        let doc = SkillDocument::parse("quoted", content, PathBuf::from("/tmp/SKILL.md"));

        assert_eq!(doc.frontmatter_name.as_deref(), Some("quoted"));
        assert_eq!(doc.description.as_deref(), Some("Single quoted"));
    }

    #[test]
    fn missing_frontmatter_is_not_fatal() {
        let content = "# No frontmatter\nJust markdown.";
        let doc = SkillDocument::parse("bare", content, PathBuf::from("/tmp/SKILL.md"));

        assert!(doc.frontmatter_name.is_none());
        assert!(doc.description.is_none());
        assert_eq!(doc.body(), content);
    }

    #[test]
    fn unclosed_frontmatter_treated_as_body() {
        let content = "---\nname: broken\nnever closed";
        let doc = SkillDocument::parse("broken", content, PathBuf::from("/tmp/SKILL.md"));

        assert!(doc.frontmatter_name.is_none());
        assert_eq!(doc.body(), content);
    }

    #[test]
    fn body_excludes_frontmatter_words() {
        let content = "---\nname: wc\ndescription: words in here do not count\n---\n\none two three";
        let doc = SkillDocument::parse("wc", content, PathBuf::from("/tmp/SKILL.md"));

        assert_eq!(doc.body().split_whitespace().count(), 3);
    }

    #[test]
    fn from_file_works() {
        let dir = tempfile::tempdir().unwrap();
        let skill_dir = dir.path().join("my-skill");
        std::fs::create_dir_all(&skill_dir).unwrap();
        let skill_path = skill_dir.join("SKILL.md");
        std::fs::write(
            &skill_path,
            "---\nname: my-skill\ndescription: From file test\n---\n\n# My Skill\n",
        )
        .unwrap();

        let doc = SkillDocument::from_file("my-skill", &skill_path).unwrap();
        assert_eq!(doc.name, "my-skill");
        assert_eq!(doc.description.as_deref(), Some("From file test"));
        assert_eq!(doc.path, skill_path);
    }

    #[test]
    fn from_file_missing_errors() {
        let result = SkillDocument::from_file("ghost", Path::new("/nonexistent/SKILL.md"));
        assert!(result.is_err());
    }
}
