// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Turn a registry gem payload into the record the plugins page shows.

use crate::error::NormalizeError;
use crate::models::{Authors, GemData, PLUGIN_TYPE_KEY, PluginRecord};
use crate::requirement::Requirement;
use crate::truncate::truncate;
use std::collections::BTreeMap;

/// The parts of a gem specification the site cares about.
#[derive(Debug, Clone)]
pub struct GemSpec {
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub version: String,
    /// Requirement on the host package, if the gem declares one.
    pub host_requirement: Option<Requirement>,
}

impl GemSpec {
    /// Build the spec view of `data`, keeping only the runtime dependency
    /// on `host`.
    pub fn from_gem_data(name: &str, host: &str, data: GemData) -> Result<Self, NormalizeError> {
        let authors = match data.authors {
            Some(Authors::List(list)) => list,
            Some(Authors::Joined(joined)) => joined
                .split(',')
                .map(str::trim)
                .filter(|author| !author.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        let runtime = data.dependencies.map(|deps| deps.runtime).unwrap_or_default();
        let host_requirement = match runtime.into_iter().find(|dep| dep.name == host) {
            Some(dep) => Some(Requirement::parse(&dep.requirements).ok_or_else(|| {
                NormalizeError::BadRequirement {
                    name: name.to_string(),
                    host: host.to_string(),
                    requirement: dep.requirements.clone(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            authors,
            description: data.info,
            homepage: data.homepage_uri,
            metadata: data.metadata.unwrap_or_default(),
            version: data.version,
            host_requirement,
        })
    }

    pub fn plugin_type(&self) -> Option<&str> {
        self.metadata.get(PLUGIN_TYPE_KEY).map(String::as_str)
    }
}

/// Maps raw gem payloads onto `PluginRecord`s for one host package.
#[derive(Debug, Clone)]
pub struct Normalizer {
    host: String,
    max_description_len: usize,
}

impl Normalizer {
    pub fn new(host: impl Into<String>, max_description_len: usize) -> Self {
        Self {
            host: host.into(),
            max_description_len,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Normalize the registry payload for package `name`.
    pub fn normalize(
        &self,
        name: &str,
        raw: &serde_json::Value,
    ) -> Result<PluginRecord, NormalizeError> {
        let data: GemData =
            serde_json::from_value(raw.clone()).map_err(|source| NormalizeError::Malformed {
                name: name.to_string(),
                source,
            })?;

        let spec = GemSpec::from_gem_data(name, &self.host, data)?;

        let requirement =
            spec.host_requirement
                .as_ref()
                .ok_or_else(|| NormalizeError::DependencyNotFound {
                    name: name.to_string(),
                    host: self.host.clone(),
                })?;

        Ok(PluginRecord {
            name: name.to_string(),
            authors: spec.authors.join(", "),
            description: spec
                .description
                .as_deref()
                .map(|text| truncate(text, self.max_description_len))
                .unwrap_or_default(),
            homepage: spec.homepage.clone().unwrap_or_default(),
            plugin_type: spec.plugin_type().map(str::to_string),
            requirements_list: requirement.requirements_list().join(", "),
            version: spec.version.clone(),
        })
    }
}
