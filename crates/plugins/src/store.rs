// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The plugin data file: a JSON array of `PluginRecord`s.

use crate::error::StoreError;
use crate::models::PluginRecord;
use std::path::Path;

/// Overwrite `path` with `records`, creating parent directories as needed.
///
/// Not atomic: a reader racing the write can see a partial file.
pub fn write_records(path: &Path, records: &[PluginRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string(records).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, json).map_err(io_err)
}

/// Read back a file written by `write_records`.
pub fn read_records(path: &Path) -> Result<Vec<PluginRecord>, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}
