// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::models::UpdaterConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<UpdaterConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    parse_config(&content)
}

/// Parse and validate a YAML configuration document
pub fn parse_config(content: &str) -> Result<UpdaterConfig> {
    let config: UpdaterConfig =
        serde_yaml_ng::from_str(content).with_context(|| "Failed to parse YAML configuration")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub(crate) fn validate_config(config: &UpdaterConfig) -> Result<()> {
    let url = url::Url::parse(&config.registry_url)
        .with_context(|| format!("registry_url is not a valid URL: {}", config.registry_url))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("registry_url must be http or https, got {}", url.scheme());
    }

    if config.host_package.trim().is_empty() {
        anyhow::bail!("host_package cannot be empty");
    }

    if config.output_path.as_os_str().is_empty() {
        anyhow::bail!("output_path cannot be empty");
    }

    if config.max_description_len == 0 {
        anyhow::bail!("max_description_len must be greater than 0");
    }

    if config.timeout_seconds == 0 {
        anyhow::bail!("timeout_seconds must be greater than 0");
    }

    Ok(())
}

/// Write an example configuration with every default spelled out
pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let yaml = serde_yaml_ng::to_string(&UpdaterConfig::default())
        .with_context(|| "Failed to serialize example configuration")?;

    let content = format!(
        "# Plugin data refresh configuration\n\
         # on_missing_dependency: skip | abort\n\
         {yaml}"
    );

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))
}
