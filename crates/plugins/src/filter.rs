// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

/// Immutable set of package names that never appear on the site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenyList {
    names: BTreeSet<String>,
}

impl DenyList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drop denied names, keeping the order of the rest.
    pub fn filter(&self, names: Vec<String>) -> Vec<String> {
        names.into_iter().filter(|name| !self.contains(name)).collect()
    }
}
