// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Subcommand;
use diagnostics::*;
use plugins::{PluginUpdater, UpdaterConfig};
use site::PluginCatalog;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Plugin data subcommands
#[derive(Subcommand)]
pub enum PluginsCommands {
    /// Write an example refresh configuration file
    Init {
        /// Path of the configuration file to create
        #[arg(default_value = "plugins.yaml")]
        config: PathBuf,
    },
    /// Fetch plugin metadata from the registry and rewrite the plugin data file
    Refresh {
        /// Refresh configuration (YAML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the output file from the configuration
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the plugin data file grouped by plugin type
    List {
        /// Plugin data file to read
        #[arg(short, long, default_value = "plugin_data/plugins.json")]
        file: PathBuf,
    },
}

/// Execute a plugins subcommand
pub async fn plugins_command(command: &PluginsCommands, out: &mut impl Write) -> Result<()> {
    match command {
        PluginsCommands::Init { config } => init_command(config, out),
        PluginsCommands::Refresh { config, output } => {
            refresh_command(config.as_deref(), output.as_deref(), out).await
        }
        PluginsCommands::List { file } => list_command(file, out),
    }
}

fn init_command(config_path: &Path, out: &mut impl Write) -> Result<()> {
    if config_path.exists() {
        writeln!(out, "Configuration file already exists: {}", config_path.display())?;
        writeln!(out, "Delete it first if you want to create a new one.")?;
        return Ok(());
    }

    plugins::create_example_config(config_path).with_context(|| {
        format!("Failed to create configuration file: {}", config_path.display())
    })?;

    writeln!(out, "Created example configuration file: {}", config_path.display())?;
    writeln!(out, "Then run: litasite plugins refresh --config {}", config_path.display())?;
    Ok(())
}

async fn refresh_command(
    config_path: Option<&Path>,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            let shown = path.display().to_string();
            debug!("Loading configuration from: {shown}", shown);
            plugins::load_config(path)
                .with_context(|| format!("Failed to load configuration from: {}", path.display()))?
        }
        None => UpdaterConfig::default(),
    };
    if let Some(output) = output {
        config.output_path = output.to_path_buf();
    }

    let updater = PluginUpdater::new(config).context("Failed to create plugin updater")?;
    let report = updater.refresh().await.context("Plugin refresh failed")?;

    writeln!(
        out,
        "Wrote {} plugins to {}",
        report.records_written,
        report.output_path.display()
    )?;
    if !report.denied.is_empty() {
        writeln!(out, "Denied: {}", report.denied.join(", "))?;
    }
    for skipped in &report.skipped {
        writeln!(out, "Skipped {}: {}", skipped.name, skipped.reason)?;
    }
    Ok(())
}

fn list_command(file: &Path, out: &mut impl Write) -> Result<()> {
    let catalog = PluginCatalog::load(file)?;

    if catalog.is_empty() {
        writeln!(out, "No plugins in {}", file.display())?;
        return Ok(());
    }

    for group in catalog.grouped() {
        let heading = group.plugin_type.as_deref().unwrap_or("other");
        writeln!(out, "{} ({})", heading, group.plugins.len())?;
        for plugin in &group.plugins {
            writeln!(
                out,
                "  {} {} [lita {}] {}",
                plugin.name, plugin.version, plugin.requirements_list, plugin.authors
            )?;
        }
    }
    Ok(())
}
