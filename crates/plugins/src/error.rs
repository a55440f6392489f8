// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Failure talking to the package registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Failed to send request to {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} error from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON payload from {url} failed to parse: {source}")]
    Decode {
        url: String,
        payload: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// The raw response body, when one was received.
    pub fn payload(&self) -> Option<&str> {
        match self {
            RegistryError::Network { .. } => None,
            RegistryError::Status { body, .. } => Some(body),
            RegistryError::Decode { payload, .. } => Some(payload),
        }
    }
}

/// Failure turning one registry payload into a `PluginRecord`.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Malformed gem payload for {name}: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name} has no runtime dependency on {host}")]
    DependencyNotFound { name: String, host: String },

    #[error("{name} declares an invalid requirement on {host}: {requirement:?}")]
    BadRequirement {
        name: String,
        host: String,
        requirement: String,
    },
}

/// Failure reading or writing the plugin data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error on {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure that stops a refresh run.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Failed to fetch reverse dependencies of {host}: {source}")]
    ReverseDependencies {
        host: String,
        #[source]
        source: RegistryError,
    },

    #[error("Refresh aborted: {0}")]
    MissingDependency(#[source] NormalizeError),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to persist plugin data: {0}")]
    Persist(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, UpdateError>;
