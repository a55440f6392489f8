// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Plugins — RubyGems plugin data for the lita.io site
//!
//! Finds every gem that depends on the host package, drops denied names,
//! normalizes each gem's metadata into a `PluginRecord` and writes the list
//! to a JSON file the site templates read.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod requirement;
pub mod store;
pub mod truncate;

pub use crate::client::Client;
pub use crate::config::{create_example_config, load_config, parse_config};
pub use crate::error::{NormalizeError, RegistryError, StoreError, UpdateError};
pub use crate::filter::DenyList;
pub use crate::models::{MissingDependencyPolicy, PluginRecord, UpdaterConfig};
pub use crate::normalize::Normalizer;
pub use crate::store::{read_records, write_records};

use crate::error::Result;
use diagnostics::*;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

/// A package that was left out of the output, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPlugin {
    pub name: String,
    pub reason: String,
}

/// Records gathered from the registry, before anything is written.
#[derive(Debug, Default)]
pub struct Collection {
    pub records: Vec<PluginRecord>,
    /// Reverse dependencies removed by the deny list, in registry order.
    pub denied: Vec<String>,
    pub skipped: Vec<SkippedPlugin>,
}

/// Result of a successful refresh.
#[derive(Debug)]
pub struct RefreshReport {
    pub output_path: PathBuf,
    pub records_written: usize,
    pub denied: Vec<String>,
    pub skipped: Vec<SkippedPlugin>,
}

/// Refreshes the plugin data file from the registry
pub struct PluginUpdater {
    config: UpdaterConfig,
    client: Client,
    deny_list: DenyList,
    normalizer: Normalizer,
}

impl PluginUpdater {
    pub fn new(config: UpdaterConfig) -> Result<Self> {
        let client = Client::with_timeout(
            config.registry_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
        .map_err(UpdateError::Client)?;

        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: UpdaterConfig, client: Client) -> Self {
        let deny_list = DenyList::new(config.deny_list.iter().cloned());
        let normalizer = Normalizer::new(config.host_package.clone(), config.max_description_len);

        Self {
            config,
            client,
            deny_list,
            normalizer,
        }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Fetch, filter and normalize every plugin, one request at a time.
    pub async fn collect(&self) -> Result<Collection> {
        let host = self.normalizer.host();
        info!("Fetching reverse dependencies of {host}", host);

        let names = self
            .client
            .fetch_reverse_dependencies(host)
            .await
            .map_err(|source| UpdateError::ReverseDependencies {
                host: host.to_string(),
                source,
            })?;

        let denied: Vec<String> = names
            .iter()
            .filter(|name| self.deny_list.contains(name))
            .cloned()
            .collect();
        let mut names = self.deny_list.filter(names);

        // Names are unique within a run; the first listing wins.
        let mut seen = BTreeSet::new();
        names.retain(|name| {
            let first = seen.insert(name.clone());
            if !first {
                debug!("Ignoring repeated listing of {name}", name);
            }
            first
        });

        let count = names.len();
        let denied_count = denied.len();
        info!("Found {count} plugins ({denied_count} denied)", count, denied_count);

        let mut collection = Collection {
            denied,
            ..Collection::default()
        };

        for name in names {
            match self.collect_one(&name).await? {
                Ok(record) => collection.records.push(record),
                Err(reason) => collection.skipped.push(SkippedPlugin { name, reason }),
            }
        }

        Ok(collection)
    }

    /// Fetch and normalize one plugin.
    ///
    /// The outer result fails the run; the inner one skips the package.
    async fn collect_one(&self, name: &str) -> Result<std::result::Result<PluginRecord, String>> {
        debug!("Fetching gem {name}", name);

        let raw = match self.client.fetch_gem(name).await {
            Ok(raw) => raw,
            Err(e) => {
                let reason = e.to_string();
                let payload = e.payload().unwrap_or_default();
                warn!("Skipping {name}: {reason}. Payload: {payload}", name, reason, payload);
                return Ok(Err(reason));
            }
        };

        match self.normalizer.normalize(name, &raw) {
            Ok(record) => Ok(Ok(record)),
            Err(e @ NormalizeError::DependencyNotFound { .. })
                if self.config.on_missing_dependency == MissingDependencyPolicy::Abort =>
            {
                let reason = e.to_string();
                error!("Aborting refresh: {reason}", reason);
                Err(UpdateError::MissingDependency(e))
            }
            Err(e) => {
                let reason = e.to_string();
                let payload = raw.to_string();
                warn!("Skipping {name}: {reason}. Payload: {payload}", name, reason, payload);
                Ok(Err(reason))
            }
        }
    }

    /// Collect every plugin and overwrite the output file with the result.
    pub async fn refresh(&self) -> Result<RefreshReport> {
        let collection = self.collect().await?;

        let output_path = self.config.output_path.clone();
        write_records(&output_path, &collection.records)?;

        let records_written = collection.records.len();
        let skipped_count = collection.skipped.len();
        let path = output_path.display().to_string();
        info!("Wrote {records_written} plugins to {path} ({skipped_count} skipped)", records_written, path, skipped_count);

        Ok(RefreshReport {
            output_path,
            records_written,
            denied: collection.denied,
            skipped: collection.skipped,
        })
    }
}
