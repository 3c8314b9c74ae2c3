//! # soundcheck-skills
//!
//! Security-review skills are Markdown documents that teach a model how to
//! audit code for one class of vulnerability. Each skill is a directory
//! containing a `SKILL.md` file (Markdown with YAML frontmatter) and is
//! paired with a deliberately vulnerable sample under `docs/test-cases/`
//! that shares the directory's name.
//!
//! ## SKILL.md Format
//!
//! ```markdown
//! ---
//! name: sql-injection
//! description: Detect SQL built by string concatenation
//! ---
//!
//! # SQL Injection (A03:2021)
//!
//! ## What this checks
//! Queries assembled from untrusted input.
//!
//! ## Vulnerable patterns
//! String formatting into SQL text.
//!
//! ## Fix immediately
//! Parameterized queries.
//!
//! ## Verification
//! - [ ] Identifies the injectable query
//! - [ ] Proposes parameterized queries as the fix
//!
//! ## References
//! - CWE-89
//! ```
//!
//! ## How skills are exercised
//!
//! 1. [`SkillLibrary::discover`] loads every `skills/*/SKILL.md`
//! 2. The full document becomes the reviewer model's system prompt
//! 3. [`extract_criteria`] pulls the `## Verification` checklist, which a
//!    judge model grades the review against
//! 4. [`lint_skill`] enforces the static authoring rules before any model
//!    is ever called

pub mod criteria;
pub mod document;
pub mod library;
pub mod lint;

pub use criteria::extract_criteria;
pub use document::SkillDocument;
pub use library::SkillLibrary;
pub use lint::{lint_skill, MAX_WORDS, REQUIRED_SECTIONS};
