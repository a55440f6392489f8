// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{PluginsCommands, SiteCommands, plugins_command, site_command};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "litasite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cached plugin list shown on the site
    Plugins {
        #[command(subcommand)]
        command: PluginsCommands,
    },
    /// Inspect site configuration
    Site {
        #[command(subcommand)]
        command: SiteCommands,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init_diagnostics();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Plugins { command } => plugins_command(command, &mut stdout).await,
        Commands::Site { command } => site_command(command, &mut stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_refresh() -> Result<()> {
        let cli = Cli::try_parse_from([
            "litasite", "plugins", "refresh", "--config", "plugins.yaml", "-o", "out.json",
        ])?;
        match cli.command {
            Commands::Plugins {
                command: PluginsCommands::Refresh { config, output },
            } => {
                assert_eq!(config.as_deref(), Some(std::path::Path::new("plugins.yaml")));
                assert_eq!(output.as_deref(), Some(std::path::Path::new("out.json")));
            }
            _ => anyhow::bail!("parsed the wrong command"),
        }
        Ok(())
    }
}
