//! Strict-mode parsing of bootstrap files.
//!
//! The document is deserialized once through `serde_ignored`; every key the
//! target type does not consume is reported with its file path and a
//! best-effort line number. Free-form tables (such as `[config]`) consume
//! everything under them and never produce unknown keys.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::MandrelError;

/// Deserialize `content`, failing on keys `T` does not know about.
pub fn parse_strict<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, MandrelError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let parsed: T = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| MandrelError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(parsed);
    }

    let errors: Vec<MandrelError> = unknown_keys
        .into_iter()
        .map(|key| MandrelError::UnknownKey {
            line: find_key_line(content, &key),
            key,
            path: path.to_path_buf(),
        })
        .collect();

    Err(MandrelError::UnknownKeys(errors))
}

/// Deserialize `content`, silently dropping unknown keys.
pub fn parse_lenient<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, MandrelError> {
    toml::from_str(content).map_err(|e| MandrelError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// 1-indexed line of a dotted key, or 0 if it cannot be located.
///
/// Matches `leaf = ...` inside the right `[section]`, and the fully dotted
/// form `section.leaf = ...` at the top level. Quoted keys and inline tables
/// are not handled.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let (section, leaf) = match dotted_key.rsplit_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", dotted_key),
    };

    let mut current_section = String::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(header) = trimmed
            .strip_prefix('[')
            .filter(|h| !h.starts_with('['))
            .and_then(|h| h.split(']').next())
        {
            current_section = header
                .split('.')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(".");
            continue;
        }

        let Some((lhs, _)) = trimmed.split_once('=') else {
            continue;
        };
        let lhs: String = lhs.split('.').map(str::trim).collect::<Vec<_>>().join(".");

        let matches_in_section = current_section == section && lhs == leaf;
        let matches_dotted = current_section.is_empty() && lhs == dotted_key;
        if matches_in_section || matches_dotted {
            return i + 1;
        }
    }
    0
}
