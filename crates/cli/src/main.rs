// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lull - upload files from a folder once they stop changing

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, watch};

#[derive(Parser)]
#[command(
    name = "lull",
    version,
    about = "Upload files from a folder once they stop changing"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the folder and upload files that have gone quiet
    Watch(config::ConfigArgs),
    /// Validate the configuration and print the resolved settings
    Check(check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch(args) => watch::handle(args).await,
        Commands::Check(args) => check::handle(args),
    }
}
