// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Subcommand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Site configuration subcommands
#[derive(Subcommand)]
pub enum SiteCommands {
    /// Validate a site configuration and print it with defaults filled in
    Show {
        /// Site configuration file (YAML)
        config: PathBuf,
    },
}

/// Execute a site subcommand
pub fn site_command(command: &SiteCommands, out: &mut impl Write) -> Result<()> {
    match command {
        SiteCommands::Show { config } => show_command(config, out),
    }
}

fn show_command(config_path: &Path, out: &mut impl Write) -> Result<()> {
    let config = site::load_site_config(config_path)?;
    let yaml = serde_yaml_ng::to_string(&config).context("Failed to render site configuration")?;
    write!(out, "{yaml}")?;
    Ok(())
}
