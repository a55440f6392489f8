// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Metadata key holding a plugin's category (handler, adapter, extension).
pub const PLUGIN_TYPE_KEY: &str = "lita_plugin_type";

/// Packages excluded from the plugin list regardless of registry state.
pub const DEFAULT_DENY_LIST: &[&str] = &[
    "lita-boobs",
    "lita_chm",
    "lita-console",
    "lita-everquotes",
    "lita-kitchen",
    "lita-slack-handler",
    "lita-talk",
];

/// One plugin as published on the site.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub name: String,
    pub authors: String,
    pub description: String,
    pub homepage: String,
    pub plugin_type: Option<String>,
    pub requirements_list: String,
    pub version: String,
}

/// Package payload returned by the per-gem registry endpoint.
///
/// Only the fields the site uses are decoded; everything else the registry
/// sends is ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct GemData {
    #[serde(default)]
    pub authors: Option<Authors>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub homepage_uri: Option<String>,
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
    pub version: String,
    #[serde(default)]
    pub dependencies: Option<Dependencies>,
}

/// The registry has served authors both as a list and as one joined string.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Authors {
    List(Vec<String>),
    Joined(String),
}

/// Declared dependencies. Development dependencies are not decoded.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Dependencies {
    #[serde(default)]
    pub runtime: Vec<GemDependency>,
}

/// A single dependency declaration, e.g. `lita` with `">= 4.7, < 5.0"`.
#[derive(Deserialize, Debug, Clone)]
pub struct GemDependency {
    pub name: String,
    #[serde(default)]
    pub requirements: String,
}

/// What to do with a package that does not depend on the host package.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingDependencyPolicy {
    /// Log the package and leave it out of the output.
    #[default]
    Skip,
    /// Stop the refresh without writing anything.
    Abort,
}

/// Configuration for the plugin data refresh
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UpdaterConfig {
    pub registry_url: String,
    pub host_package: String,
    pub output_path: PathBuf,
    pub max_description_len: usize,
    pub timeout_seconds: u64,
    pub on_missing_dependency: MissingDependencyPolicy,
    pub deny_list: Vec<String>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            registry_url: "https://rubygems.org".to_string(),
            host_package: "lita".to_string(),
            output_path: PathBuf::from("plugin_data/plugins.json"),
            max_description_len: crate::truncate::DEFAULT_MAX_LEN,
            timeout_seconds: 60,
            on_missing_dependency: MissingDependencyPolicy::default(),
            deny_list: DEFAULT_DENY_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_site_field_names() {
        let record = PluginRecord {
            name: "lita-karma".to_string(),
            authors: "Jimmy Cuadra".to_string(),
            description: "Karma".to_string(),
            homepage: String::new(),
            plugin_type: None,
            requirements_list: ">= 4.0".to_string(),
            version: "3.0.0".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"lita-karma","authors":"Jimmy Cuadra","description":"Karma","homepage":"","pluginType":null,"requirementsList":">= 4.0","version":"3.0.0"}"#
        );
    }

    #[test]
    fn test_gem_data_tolerates_nulls_and_extra_fields() {
        let raw = serde_json::json!({
            "name": "lita-foo",
            "downloads": 1234,
            "authors": "A. Person, B. Person",
            "info": null,
            "homepage_uri": null,
            "metadata": {},
            "version": "1.2.3",
            "dependencies": { "runtime": [], "development": [] }
        });
        let gem: GemData = serde_json::from_value(raw).unwrap();
        assert_eq!(gem.version, "1.2.3");
        assert!(gem.info.is_none());
        assert_eq!(
            gem.authors,
            Some(Authors::Joined("A. Person, B. Person".to_string()))
        );
    }

    #[test]
    fn test_gem_data_requires_version() {
        let raw = serde_json::json!({ "name": "lita-foo" });
        assert!(serde_json::from_value::<GemData>(raw).is_err());
    }

    #[test]
    fn test_default_config_matches_lita() {
        let config = UpdaterConfig::default();
        assert_eq!(config.host_package, "lita");
        assert_eq!(config.max_description_len, 255);
        assert_eq!(config.on_missing_dependency, MissingDependencyPolicy::Skip);
        assert!(config.deny_list.iter().any(|name| name == "lita-console"));
    }
}
