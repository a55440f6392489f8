// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging setup shared by the litasite crates.
//!
//! Usage:
//! - Set LITASITE_LOG=off - no logs
//! - Set LITASITE_LOG=warn (default) - skipped packages and other recoverable problems
//! - Set LITASITE_LOG=info - refresh progress
//! - Set LITASITE_LOG=debug - per-request detail

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "LITASITE_LOG";

const DEFAULT_LEVEL: &str = "warn";

static INIT: Once = Once::new();

/// Map a `LITASITE_LOG` value onto an emit level.
///
/// `None` means logging is switched off. Unknown values fall back to `Info`
/// and are reported by `init_diagnostics`.
fn parse_level(value: &str) -> Result<Option<emit::Level>, ()> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(None),
        "debug" => Ok(Some(emit::Level::Debug)),
        "info" => Ok(Some(emit::Level::Info)),
        "warn" => Ok(Some(emit::Level::Warn)),
        "error" => Ok(Some(emit::Level::Error)),
        _ => Err(()),
    }
}

/// Initialize diagnostics based on the LITASITE_LOG environment variable.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let log_level = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LEVEL.to_string());

        let level = match parse_level(&log_level) {
            Ok(None) => return,
            Ok(Some(level)) => level,
            Err(()) => {
                // Bootstrap warning, emitted before the runtime exists
                eprintln!("Warning: Unknown {LOG_ENV} value '{log_level}', using 'info'");
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The runtime lives for the whole process
        std::mem::forget(rt);
    });
}

/// Log basic operations: refresh started, records written.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics: request URLs, per-package progress.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems: a package skipped, a fallback taken.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that stop an operation.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
