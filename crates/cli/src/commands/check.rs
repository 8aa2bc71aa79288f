// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validate configuration without watching

use crate::config::{self, ConfigArgs};
use crate::output::{self, OutputFormat};
use anyhow::Result;

#[derive(clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the resolved settings as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: CheckArgs) -> Result<()> {
    let settings = config::load(&args.config)?;
    output::print(&settings, OutputFormat::from_json_flag(args.json))
}
