// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Description truncation for the plugin list.
//!
//! Truncation is not idempotent: the result can be up to three characters
//! longer than `max`, so truncating it again may cut another word.

use regex::Regex;
use std::sync::LazyLock;

/// Default description bound, in characters.
pub const DEFAULT_MAX_LEN: usize = 255;

const ELLIPSIS: &str = "...";

/// Whitespace, a partial word, and any whitespace after it, at the end.
static TRAILING_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\S+\s*$").unwrap());

/// Bound `text` to `max` characters without ending mid-word.
///
/// Text that fits is returned unchanged. Otherwise the first `max`
/// characters are kept, the trailing partial word is dropped and `"..."` is
/// appended. A prefix that is one unbroken token keeps all `max` characters.
pub fn truncate(text: &str, max: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max) else {
        return text.to_string();
    };

    let prefix = &text[..cut];
    match TRAILING_WORD.find(prefix) {
        Some(tail) => format!("{}{ELLIPSIS}", &prefix[..tail.start()]),
        None => format!("{prefix}{ELLIPSIS}"),
    }
}
