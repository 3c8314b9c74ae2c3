use clap::Parser;
use soundcheck_cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A failing smoke run exits non-zero through the returned code; only
    // setup problems (bad config, missing key) land in the error branch.
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::FAILURE
        }
    }
}
