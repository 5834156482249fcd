//! `spgate` command-line client.
//!
//! Results go to stdout as JSON lines; logs go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

mod cli;
mod commands;
mod logging;
mod sink;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    logging::init();

    let cli = Cli::parse();

    match commands::run(cli.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Command failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
