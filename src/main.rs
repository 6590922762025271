use std::process::ExitCode;

use anifetch::{config::Cli, info_time, process::run, warn_time};
use chrono::Local;
use clap::Parser;

const USAGE: &str = "Usage: anifetch [start-end]\nExample: anifetch 1-200";

#[tokio::main]
async fn main() -> ExitCode {
    let start_time = Local::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}
{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    // Range and flag errors surface before any request is made.
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(&config).await {
        warn_time!("{}", err);
        return ExitCode::FAILURE;
    }
    info_time!(start_time, "Full program time:");

    ExitCode::SUCCESS
}
