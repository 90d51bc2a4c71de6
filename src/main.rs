//! Entry point for the `jecket` command.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use jecket::cli_args::Cli;
use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    match jecket::commands::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
