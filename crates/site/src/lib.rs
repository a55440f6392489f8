// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Site — configuration and template data for lita.io
//!
//! The static site generator itself is external. This crate holds what it
//! consumes: the per-site YAML configuration, the title and link helpers,
//! and the plugin catalog built from the refreshed plugin data.

mod catalog;
mod config;
pub mod helpers;

pub use catalog::{PluginCatalog, PluginGroup};
pub use config::{
    AssetDirs, BuildOptions, MarkdownOptions, PageRule, ServerOptions, SiteConfig, SiteMeta,
    load_site_config,
};
pub use helpers::{PageData, prefix_with_base_url, rewrite_link, title_tag};
