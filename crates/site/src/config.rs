// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Site configuration: one YAML file per (sub)site.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level site configuration.
///
/// ```yaml
/// site:
///   title: "Lita.io"
///   base_url: "/docs/"
///
/// assets:
///   css_dir: stylesheets
///   js_dir: javascripts
///   images_dir: images
///
/// markdown:
///   auto_ids: false
///
/// build:
///   asset_hash: true
///   gzip: true
///
/// pages:
///   - path: "/index.html"
///     layout: outer
///
/// plugin_data: "plugin_data/plugins.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteMeta,
    #[serde(default)]
    pub assets: AssetDirs,
    #[serde(default)]
    pub markdown: MarkdownOptions,
    #[serde(default = "default_true")]
    pub directory_indexes: bool,
    #[serde(default)]
    pub server: ServerOptions,
    #[serde(default)]
    pub build: BuildOptions,
    #[serde(default)]
    pub pages: Vec<PageRule>,
    #[serde(default = "default_plugin_data")]
    pub plugin_data: PathBuf,
}

/// Site-wide metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeta {
    /// Appended to every page title, e.g. "Lita.io"
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Asset source directories, relative to the site source root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetDirs {
    pub css_dir: String,
    pub js_dir: String,
    pub images_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Generate `id` attributes for headings
    pub auto_ids: bool,
}

/// Features active only under the development server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerOptions {
    pub livereload: bool,
}

/// Features active only for production builds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildOptions {
    pub asset_hash: bool,
    pub gzip: bool,
    pub minify_css: bool,
    pub minify_javascript: bool,
}

/// Layout override for a single page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRule {
    pub path: String,
    pub layout: String,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "/".to_string()
}

fn default_plugin_data() -> PathBuf {
    PathBuf::from("plugin_data/plugins.json")
}

impl Default for AssetDirs {
    fn default() -> Self {
        Self {
            css_dir: "stylesheets".to_string(),
            js_dir: "javascripts".to_string(),
            images_dir: "images".to_string(),
        }
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { livereload: true }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            asset_hash: true,
            gzip: true,
            minify_css: true,
            minify_javascript: true,
        }
    }
}

impl SiteConfig {
    /// Layout configured for `path`, if it has one.
    pub fn layout_for(&self, path: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|rule| rule.path == path)
            .map(|rule| rule.layout.as_str())
    }

    /// Parse and validate a YAML site configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: SiteConfig =
            serde_yaml_ng::from_str(content).with_context(|| "Failed to parse site configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            anyhow::bail!("site.title cannot be empty");
        }
        if !self.site.base_url.starts_with('/') {
            anyhow::bail!("site.base_url must start with '/', got {:?}", self.site.base_url);
        }
        for (key, dir) in [
            ("css_dir", &self.assets.css_dir),
            ("js_dir", &self.assets.js_dir),
            ("images_dir", &self.assets.images_dir),
        ] {
            if dir.trim().is_empty() {
                anyhow::bail!("assets.{key} cannot be empty");
            }
            if Path::new(dir).is_absolute() {
                anyhow::bail!("assets.{key} must be relative, got {dir:?}");
            }
        }
        Ok(())
    }
}

/// Load a site configuration from a YAML file
pub fn load_site_config<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read site config: {}", path.as_ref().display()))?;
    SiteConfig::from_yaml(&content)
        .with_context(|| format!("Invalid site config: {}", path.as_ref().display()))
}
