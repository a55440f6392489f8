// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Plugin list as the plugins page renders it.

use anyhow::{Context, Result};
use diagnostics::*;
use plugins::PluginRecord;
use serde::Serialize;
use std::path::Path;

/// Plugins of one type, sorted by name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginGroup {
    pub plugin_type: Option<String>,
    pub plugins: Vec<PluginRecord>,
}

/// The cached plugin data loaded for templates.
#[derive(Debug, Clone, Default)]
pub struct PluginCatalog {
    records: Vec<PluginRecord>,
}

impl PluginCatalog {
    pub fn new(records: Vec<PluginRecord>) -> Self {
        Self { records }
    }

    /// Load the file written by a plugin refresh.
    pub fn load(path: &Path) -> Result<Self> {
        let records = plugins::read_records(path)
            .with_context(|| format!("Failed to load plugin data from {}", path.display()))?;
        let count = records.len();
        debug!("Loaded {count} plugin records", count);
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted by name, grouped by plugin type.
    ///
    /// Groups come in the order their first member appears in the sorted
    /// list; untyped plugins share a group with no type.
    pub fn grouped(&self) -> Vec<PluginGroup> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut groups: Vec<PluginGroup> = Vec::new();
        for record in sorted {
            match groups
                .iter_mut()
                .find(|group| group.plugin_type == record.plugin_type)
            {
                Some(group) => group.plugins.push(record),
                None => groups.push(PluginGroup {
                    plugin_type: record.plugin_type.clone(),
                    plugins: vec![record],
                }),
            }
        }
        groups
    }

    /// Template data for the plugins page.
    pub fn to_template_data(&self) -> serde_json::Value {
        serde_json::json!({ "litaPlugins": self.grouped() })
    }
}
