use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::document::SkillDocument;

/// The skill library — discovers SKILL.md documents and their paired
/// vulnerable samples.
///
/// Layout mirrors a skill repository checkout:
///
/// ```text
/// skills/<name>/SKILL.md         the skill document
/// docs/test-cases/<name>.<ext>   the vulnerable sample (stem = skill name)
/// ```
pub struct SkillLibrary {
    skills: HashMap<String, SkillDocument>,
    skills_dir: PathBuf,
    test_cases_dir: PathBuf,
}

impl SkillLibrary {
    pub fn new(skills_dir: &Path, test_cases_dir: &Path) -> Self {
        Self {
            skills: HashMap::new(),
            skills_dir: skills_dir.to_path_buf(),
            test_cases_dir: test_cases_dir.to_path_buf(),
        }
    }

    /// Discover and load every `<skill>/SKILL.md` under the skills
    /// directory. Unreadable documents are skipped with a warning; a
    /// missing directory is simply empty. Returns the loaded names, sorted.
    pub fn discover(&mut self) -> soundcheck_core::Result<Vec<String>> {
        let mut loaded = Vec::new();

        if !self.skills_dir.exists() {
            debug!(dir = ?self.skills_dir, "skills directory does not exist, skipping");
            return Ok(loaded);
        }

        let entries = std::fs::read_dir(&self.skills_dir).map_err(|e| {
            soundcheck_core::SoundcheckError::Skill(format!(
                "failed to read skills dir {}: {}",
                self.skills_dir.display(),
                e
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| soundcheck_core::SoundcheckError::Skill(e.to_string()))?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }
            let skill_md = path.join("SKILL.md");
            if !skill_md.exists() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            match SkillDocument::from_file(&name, &skill_md) {
                Ok(doc) => {
                    info!(skill = %name, path = ?skill_md, "loaded skill");
                    loaded.push(name.clone());
                    self.skills.insert(name, doc);
                }
                Err(e) => {
                    warn!(path = ?skill_md, error = %e, "failed to load skill");
                }
            }
        }

        loaded.sort();
        Ok(loaded)
    }

    /// Register a skill document programmatically (used by tests).
    pub fn register(&mut self, doc: SkillDocument) {
        self.skills.insert(doc.name.clone(), doc);
    }

    /// Get a skill by name.
    pub fn get(&self, name: &str) -> Option<&SkillDocument> {
        self.skills.get(name)
    }

    /// All loaded skill names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.skills.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// All loaded skill documents, sorted by name.
    pub fn list(&self) -> Vec<&SkillDocument> {
        let mut docs: Vec<_> = self.skills.values().collect();
        docs.sort_by_key(|d| &d.name);
        docs
    }

    pub fn count(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Find the vulnerable sample paired with a skill: the first file in
    /// the test-cases directory whose stem equals the skill name. Ties
    /// (same stem, different extensions) resolve alphabetically.
    pub fn find_test_case(&self, name: &str) -> Option<PathBuf> {
        let entries = std::fs::read_dir(&self.test_cases_dir).ok()?;
        let mut matches: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.file_stem().is_some_and(|stem| stem == name))
            .collect();
        matches.sort();
        matches.into_iter().next()
    }

    pub fn skills_dir(&self) -> &Path {
        &self.skills_dir
    }

    pub fn test_cases_dir(&self) -> &Path {
        &self.test_cases_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_skill(root: &Path, name: &str, content: &str) {
        let dir = root.join("skills").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("SKILL.md"), content).unwrap();
    }

    #[test]
    fn discover_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(
            dir.path(),
            "injection",
            "---\nname: injection\ndescription: First\n---\n\n# Injection\n",
        );
        write_skill(
            dir.path(),
            "broken-access-control",
            "---\nname: broken-access-control\ndescription: Second\n---\n\n# BAC\n",
        );

        // Non-skill directory (no SKILL.md) should be ignored
        let noise = dir.path().join("skills").join("not-a-skill");
        std::fs::create_dir_all(&noise).unwrap();
        std::fs::write(noise.join("README.md"), "Just a readme.").unwrap();

        let mut lib = SkillLibrary::new(
            &dir.path().join("skills"),
            &dir.path().join("docs/test-cases"),
        );
        let loaded = lib.discover().unwrap();

        assert_eq!(loaded, vec!["broken-access-control", "injection"]);
        assert_eq!(lib.count(), 2);
        assert!(lib.get("injection").is_some());
        assert!(lib.get("not-a-skill").is_none());
    }

    #[test]
    fn names_and_list_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            write_skill(
                dir.path(),
                name,
                &format!("---\nname: {name}\ndescription: d\n---\n\nBody.\n"),
            );
        }

        let mut lib = SkillLibrary::new(
            &dir.path().join("skills"),
            &dir.path().join("docs/test-cases"),
        );
        lib.discover().unwrap();

        assert_eq!(lib.names(), vec!["alpha", "mid", "zeta"]);
        let listed: Vec<&str> = lib.list().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(listed, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn nonexistent_dir_is_fine() {
        let mut lib = SkillLibrary::new(
            Path::new("/nonexistent/path/to/skills"),
            Path::new("/nonexistent/path/to/test-cases"),
        );
        let loaded = lib.discover().unwrap();
        assert!(loaded.is_empty());
        assert!(lib.is_empty());
    }

    #[test]
    fn unreadable_skill_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(
            dir.path(),
            "good",
            "---\nname: good\ndescription: d\n---\n\nBody.\n",
        );
        // A directory with no SKILL.md but a SKILL.md-named subdir would
        // fail the read; here we simulate the simpler case of a dir whose
        // SKILL.md is itself a directory.
        let bad = dir.path().join("skills").join("bad").join("SKILL.md");
        std::fs::create_dir_all(&bad).unwrap();

        let mut lib = SkillLibrary::new(
            &dir.path().join("skills"),
            &dir.path().join("docs/test-cases"),
        );
        let loaded = lib.discover().unwrap();
        assert_eq!(loaded, vec!["good"]);
    }

    #[test]
    fn find_test_case_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let cases = dir.path().join("docs/test-cases");
        std::fs::create_dir_all(&cases).unwrap();
        std::fs::write(cases.join("injection.py"), "cursor.execute(query)").unwrap();
        std::fs::write(cases.join("other.js"), "eval(input)").unwrap();

        let lib = SkillLibrary::new(&dir.path().join("skills"), &cases);

        let found = lib.find_test_case("injection").unwrap();
        assert_eq!(found, cases.join("injection.py"));
        assert!(lib.find_test_case("missing").is_none());
    }

    #[test]
    fn find_test_case_prefers_alphabetical_on_tie() {
        let dir = tempfile::tempdir().unwrap();
        let cases = dir.path().join("docs/test-cases");
        std::fs::create_dir_all(&cases).unwrap();
        std::fs::write(cases.join("dup.py"), "b").unwrap();
        std::fs::write(cases.join("dup.js"), "a").unwrap();

        let lib = SkillLibrary::new(&dir.path().join("skills"), &cases);
        let found = lib.find_test_case("dup").unwrap();
        assert_eq!(found, cases.join("dup.js"));
    }

    #[test]
    fn register_and_get() {
        let mut lib = SkillLibrary::new(Path::new("skills"), Path::new("docs/test-cases"));
        lib.register(SkillDocument::parse(
            "manual",
            "---\nname: manual\ndescription: d\n---\n\nBody.",
            PathBuf::from("/skills/manual/SKILL.md"),
        ));

        assert_eq!(lib.count(), 1);
        assert!(lib.get("manual").is_some());
        assert!(lib.get("nonexistent").is_none());
    }
}
