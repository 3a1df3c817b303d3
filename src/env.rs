//! Environment inputs: the two override variables and the `PREFIX__*`
//! config layer.
//!
//! Everything here takes an iterator of `(name, value)` pairs so tests can
//! pass synthetic data instead of `std::env::vars()`.

use std::path::PathBuf;

use toml::{Table, Value};

/// Overrides read from `{PREFIX}_ROOT` and `{PREFIX}_BOOTSTRAP_NAME`.
///
/// A variable that is unset or empty counts as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub root: Option<PathBuf>,
    pub bootstrap_name: Option<String>,
}

impl EnvOverrides {
    pub fn root_forced(&self) -> bool {
        self.root.is_some()
    }

    pub fn name_forced(&self) -> bool {
        self.bootstrap_name.is_some()
    }
}

pub fn root_var(prefix: &str) -> String {
    format!("{prefix}_ROOT")
}

pub fn bootstrap_name_var(prefix: &str) -> String {
    format!("{prefix}_BOOTSTRAP_NAME")
}

/// Read the override variables for `prefix`. Pure; later duplicates win.
pub fn read_overrides(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> EnvOverrides {
    let root_key = root_var(prefix);
    let name_key = bootstrap_name_var(prefix);
    let mut overrides = EnvOverrides::default();

    for (key, value) in vars {
        if value.is_empty() {
            continue;
        }
        if key == root_key {
            overrides.root = Some(PathBuf::from(value));
        } else if key == name_key {
            overrides.bootstrap_name = Some(value);
        }
    }

    overrides
}

/// Build a `toml::Table` from environment variables matching `{PREFIX}__*`.
///
/// Double underscore `__` separates nesting levels.
/// Single `_` within a segment is literal (part of the field name), so the
/// override variables never leak into this layer.
/// Segments are lowercased to match Rust field names.
///
/// Values are parsed heuristically: bool > integer > float > string.
pub fn env_to_table(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let needle = format!("{prefix}__");
    let mut table = Table::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }

        let segments: Vec<&str> = rest.split("__").collect();
        insert_nested(&mut table, &segments, parse_env_value(&value));
    }

    table
}

fn insert_nested(table: &mut Table, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let key = first.to_lowercase();

    if rest.is_empty() {
        table.insert(key, value);
        return;
    }

    let sub = table
        .entry(&key)
        .or_insert_with(|| Value::Table(Table::new()));
    if let Value::Table(sub_table) = sub {
        insert_nested(sub_table, rest, value);
    }
}

/// Tries: bool → integer → float → string.
fn parse_env_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    // Require a dot so "NaN" and "inf" stay strings.
    if s.contains('.')
        && let Ok(f) = s.parse::<f64>()
    {
        return Value::Float(f);
    }
    Value::String(s.to_string())
}
