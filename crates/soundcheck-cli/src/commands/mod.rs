use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use soundcheck_config::{ConfigLoader, SoundcheckConfig};
use soundcheck_skills::SkillLibrary;

mod smoke;
mod validate;

/// 🔊 Soundcheck — LLM smoke-test harness for security-review skills
#[derive(Parser)]
#[command(name = "soundcheck", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to soundcheck.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true, env = "SOUNDCHECK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable verbose output (debug logging, full model responses)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run LLM smoke tests over the skill library (reviewer + judge)
    Smoke {
        /// Smoke-test a single skill instead of the whole library
        #[arg(short, long)]
        skill: Option<String>,

        /// Stop at the first failing skill
        #[arg(long)]
        fail_fast: bool,
    },
    /// Lint SKILL.md documents for structural problems (no model calls)
    Validate {
        /// Validate a single skill instead of the whole library
        #[arg(short, long)]
        skill: Option<String>,
    },
    /// List discovered skills and their paired test cases
    List,
}

impl Cli {
    pub async fn run(self) -> soundcheck_core::Result<ExitCode> {
        // Load config first so we can use it for log format
        let config = ConfigLoader::load(self.config.as_deref())?;

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };

        // Initialize tracing with appropriate format
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .with_target(false)
                .init();
        }

        match self.command {
            Commands::Smoke { skill, fail_fast } => {
                smoke::cmd_smoke(config, skill, self.verbose, fail_fast).await
            }
            Commands::Validate { skill } => validate::cmd_validate(config, skill),
            Commands::List => Self::cmd_list(config),
        }
    }

    fn cmd_list(config: SoundcheckConfig) -> soundcheck_core::Result<ExitCode> {
        let mut library =
            SkillLibrary::new(&config.paths.skills_dir, &config.paths.test_cases_dir);
        library.discover()?;

        let docs = library.list();
        if docs.is_empty() {
            println!("No skills found in {}", config.paths.skills_dir.display());
            println!(
                "  Add one as {}/<name>/SKILL.md",
                config.paths.skills_dir.display()
            );
            return Ok(ExitCode::SUCCESS);
        }

        println!("\x1b[1mAvailable Skills ({}):\x1b[0m\n", docs.len());
        for doc in docs {
            let marker = if library.find_test_case(&doc.name).is_some() {
                ""
            } else {
                "  (no test case)"
            };
            println!("  \x1b[36m{}\x1b[0m{}", doc.name, marker);
            if let Some(ref desc) = doc.description {
                println!("    {desc}");
            }
            println!("    File: {}", doc.path.display());
            println!();
        }
        Ok(ExitCode::SUCCESS)
    }
}
