use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::debug;

use soundcheck_config::SoundcheckConfig;
use soundcheck_core::{Result, SoundcheckError};
use soundcheck_skills::{SkillDocument, SkillLibrary, lint_skill};

/// One validated skill directory: its name plus everything the linter flagged.
struct Validation {
    skill: String,
    violations: Vec<String>,
}

/// Lint every skill directory (or one, with `--skill`) and render the
/// validation table. Purely local — no model calls, no network.
///
/// Unlike the smoke runner this walks raw directories rather than the
/// loaded library, so a directory missing its SKILL.md still gets a row.
pub(super) fn cmd_validate(config: SoundcheckConfig, skill: Option<String>) -> Result<ExitCode> {
    let skills_dir = &config.paths.skills_dir;
    let library = SkillLibrary::new(skills_dir, &config.paths.test_cases_dir);

    let dirs = match skill {
        Some(name) => {
            let dir = skills_dir.join(&name);
            if !dir.is_dir() {
                return Err(SoundcheckError::Config(format!(
                    "skill directory not found: {}",
                    dir.display()
                )));
            }
            vec![(name, dir)]
        }
        None => {
            let dirs = skill_directories(skills_dir)?;
            if dirs.is_empty() {
                return Err(SoundcheckError::Config(format!(
                    "no skill directories found under {}",
                    skills_dir.display()
                )));
            }
            dirs
        }
    };

    debug!(count = dirs.len(), "validating skill directories");

    let results: Vec<Validation> = dirs
        .into_iter()
        .map(|(name, dir)| validate_dir(&library, &name, &dir))
        .collect();

    println!("{}", render_report(&results));

    let fail_count = results.iter().filter(|r| !r.violations.is_empty()).count();
    Ok(if fail_count == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Skill directories under `skills_dir`, sorted by name. A missing
/// skills directory is simply empty.
fn skill_directories(skills_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !skills_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(skills_dir).map_err(|e| {
        SoundcheckError::Skill(format!(
            "failed to read skills dir {}: {}",
            skills_dir.display(),
            e
        ))
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SoundcheckError::Skill(e.to_string()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
    }

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

fn validate_dir(library: &SkillLibrary, name: &str, dir: &Path) -> Validation {
    let skill_md = dir.join("SKILL.md");
    let violations = if !skill_md.is_file() {
        vec![format!("SKILL.md not found in {}", dir.display())]
    } else {
        match SkillDocument::from_file(name, &skill_md) {
            Ok(doc) => lint_skill(library, &doc),
            Err(e) => vec![e.to_string()],
        }
    };

    Validation {
        skill: name.to_string(),
        violations,
    }
}

/// Render the validation table: header, one row per skill with indented
/// violation bullets under failing rows, then the pass/fail tally.
fn render_report(results: &[Validation]) -> String {
    let col_width = results.iter().map(|r| r.skill.len()).max().unwrap_or(0) + 2;
    let pass_count = results.iter().filter(|r| r.violations.is_empty()).count();
    let fail_count = results.len() - pass_count;

    let mut out = String::new();
    out.push_str(&format!(
        "\nSoundcheck Skill Validation — {} skills checked\n\n",
        results.len()
    ));
    out.push_str(&format!(
        "{:<col_width$} {:<8}  Violations\n",
        "Skill", "Status"
    ));
    out.push_str(&"-".repeat(72));
    out.push('\n');

    for r in results {
        if r.violations.is_empty() {
            out.push_str(&format!("{:<col_width$} PASS\n", r.skill));
        } else {
            out.push_str(&format!("{:<col_width$} FAIL\n", r.skill));
            for v in &r.violations {
                out.push_str(&format!("  {:>pad$}  • {v}\n", "", pad = col_width - 2));
            }
        }
    }

    out.push_str(&"-".repeat(72));
    out.push('\n');
    out.push_str(&format!(
        "\nResults: {pass_count} passed, {fail_count} failed\n"
    ));
    out
}
