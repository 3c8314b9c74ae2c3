use std::process::ExitCode;
use std::sync::Arc;

use soundcheck_config::SoundcheckConfig;
use soundcheck_core::{Result, SoundcheckError};
use soundcheck_harness::report;
use soundcheck_harness::{RunOptions, SmokeRunner};
use soundcheck_llm::AnthropicProvider;
use soundcheck_skills::SkillLibrary;

/// Run the reviewer/judge smoke tests and render the report table.
///
/// Rows print as each skill finishes so a slow run still shows progress;
/// the failed-criteria breakdown and the summary wait for the end.
pub(super) async fn cmd_smoke(
    config: SoundcheckConfig,
    skill: Option<String>,
    verbose: bool,
    fail_fast: bool,
) -> Result<ExitCode> {
    let mut library = SkillLibrary::new(&config.paths.skills_dir, &config.paths.test_cases_dir);
    library.discover()?;

    if skill.is_none() && library.is_empty() {
        return Err(SoundcheckError::Config(format!(
            "no skill directories found under {}",
            config.paths.skills_dir.display()
        )));
    }

    let api_key = config.services.anthropic_api_key.clone().ok_or_else(|| {
        SoundcheckError::Config(
            "no Anthropic API key: set ANTHROPIC_API_KEY or services.anthropic_api_key".into(),
        )
    })?;

    let mut provider = AnthropicProvider::new(api_key);
    if let Some(ref url) = config.services.anthropic_base_url {
        provider = provider.with_base_url(url.clone());
    }

    let runner = SmokeRunner::new(Arc::new(provider), &config.smoke);
    let options = RunOptions {
        skill,
        verbose,
        fail_fast,
    };

    // The header counts what we ASK for, not what exists — a missing skill
    // still gets its own FAIL row below.
    let names: Vec<String> = match options.skill {
        Some(ref name) => vec![name.clone()],
        None => library.names().into_iter().map(String::from).collect(),
    };
    let col_width = report::column_width(names.iter().map(String::as_str));

    println!(
        "{}",
        report::render_header(names.len(), &config.smoke.model, col_width)
    );

    let summary = runner
        .run(&library, &options, |result| {
            println!("{}", report::render_row(result, col_width));
        })
        .await;

    if summary.stopped_early {
        println!("\nStopping on first failure (--fail-fast)");
    }

    println!("{}", report::rule());

    for result in &summary.results {
        if let Some(block) = report::render_failures(result) {
            println!("{block}");
        }
    }

    println!("{}", report::render_summary(&summary));

    Ok(if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
