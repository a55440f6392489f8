// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Template helpers shared by every page.

use serde::{Deserialize, Serialize};

/// Frontmatter fields that feed the page title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageData {
    pub title: Option<String>,
    /// Guide the page belongs to, e.g. "Getting Started"
    pub guide: Option<String>,
    pub section: Option<String>,
    /// Set on a guide's overview page
    pub overview: bool,
}

/// Build the `<title>` text for a page.
///
/// An explicit title wins. Guide overview pages use the guide name, other
/// guide pages use "guide: section", and everything else is "Documentation".
pub fn title_tag(page: &PageData, site_title: &str) -> String {
    let title = match (&page.title, &page.guide) {
        (Some(title), _) => title.clone(),
        (None, Some(guide)) if page.overview => guide.clone(),
        (None, Some(guide)) => {
            format!("{}: {}", guide, page.section.as_deref().unwrap_or_default())
        }
        (None, None) => "Documentation".to_string(),
    };
    format!("{} - {}", title, site_title)
}

/// Prepend base_url to an absolute path.
///
/// If `base_url` is `/` (default), returns `path` unchanged.
/// If `base_url` is `/book/`, returns `/book/plugins` for `/plugins`.
pub fn prefix_with_base_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Rewrite an `href` for a site served under `base_url`.
///
/// Only root-relative links move. Links with a scheme, protocol-relative
/// links, fragments, queries and document-relative links already resolve
/// correctly and come back unchanged.
pub fn rewrite_link(base_url: &str, href: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        prefix_with_base_url(base_url, href)
    } else {
        href.to_string()
    }
}
