//! The configuration handle exposed to bootstrap files as `config`.
//!
//! Values live in three sparse layers, merged on read:
//!
//! ```text
//! [config] table of the bootstrap file
//!        ↑ overridden by
//! PREFIX__KEY environment variables
//!        ↑ overridden by
//! Configuration::set()
//! ```
//!
//! [`Configuration::extract`] adds compiled `#[config(default)]` values of a
//! confique struct underneath all three and hands back a typed struct.

use confique::Config;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::error::MandrelError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    file: Table,
    env: Table,
    overrides: Table,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_env_layer(env: Table) -> Self {
        Self {
            env,
            ..Self::default()
        }
    }

    /// Deep-merge a bootstrap file's `[config]` table into the file layer.
    pub(crate) fn merge_file_layer(&mut self, table: Table) {
        let file = std::mem::take(&mut self.file);
        self.file = deep_merge(file, table);
    }

    /// Set a value by dotted key at the highest-priority layer.
    ///
    /// Fails if an intermediate segment already holds a non-table value.
    pub fn set(&mut self, dotted_key: &str, value: impl Into<Value>) -> Result<(), MandrelError> {
        set_nested(&mut self.overrides, dotted_key, value.into())
    }

    /// The resolved value for a dotted key (e.g. `"database.url"`).
    pub fn get(&self, dotted_key: &str) -> Option<Value> {
        let merged = self.merged();
        table_get(&merged, dotted_key).cloned()
    }

    pub fn contains(&self, dotted_key: &str) -> bool {
        self.get(dotted_key).is_some()
    }

    /// All layers merged into one table.
    pub fn merged(&self) -> Table {
        let merged = deep_merge(self.file.clone(), self.env.clone());
        deep_merge(merged, self.overrides.clone())
    }

    /// Leaf values as sorted dotted-key pairs. Arrays count as leaves.
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut out = Vec::new();
        flatten_into(&self.merged(), "", &mut out);
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty() && self.env.is_empty() && self.overrides.is_empty()
    }

    /// Resolve the merged view into a typed confique config.
    ///
    /// 1. Deserialize the merged table into `C::Layer`
    /// 2. `C::builder().preloaded(layer).load()` fills defaults and checks
    ///    required fields
    pub fn extract<C: Config>(&self) -> Result<C, MandrelError>
    where
        C::Layer: DeserializeOwned,
    {
        let layer: C::Layer = Value::Table(self.merged())
            .try_into()
            .map_err(|e: toml::de::Error| MandrelError::InvalidValue {
                key: "<config>".into(),
                reason: e.to_string(),
            })?;

        C::builder()
            .preloaded(layer)
            .load()
            .map_err(MandrelError::from)
    }
}

/// Deep-merge `overlay` on top of `base`.
/// If both sides have a Table for the same key, recurse.
/// Otherwise, `overlay`'s value wins.
pub(crate) fn deep_merge(mut base: Table, overlay: Table) -> Table {
    for (key, overlay_val) in overlay {
        match (base.remove(&key), overlay_val) {
            (Some(Value::Table(base_tbl)), Value::Table(overlay_tbl)) => {
                base.insert(key, Value::Table(deep_merge(base_tbl, overlay_tbl)));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}

fn set_nested(table: &mut Table, dotted_key: &str, value: Value) -> Result<(), MandrelError> {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(MandrelError::KeyNotFound(dotted_key.into()));
    };
    if segments.iter().any(|s| s.is_empty()) {
        return Err(MandrelError::InvalidValue {
            key: dotted_key.into(),
            reason: "empty key segment".into(),
        });
    }

    let mut current = table;
    for segment in parents {
        current = current
            .entry(*segment)
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| MandrelError::InvalidValue {
                key: dotted_key.into(),
                reason: format!("'{segment}' is already set to a non-table value"),
            })?;
    }

    current.insert(leaf.to_string(), value);
    Ok(())
}

/// Navigate a `toml::Table` by dotted key path (e.g. `"database.url"`).
pub(crate) fn table_get<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let tbl = match path {
        Some(path) => {
            let mut current = table;
            for segment in path.split('.') {
                current = current.get(segment)?.as_table()?;
            }
            current
        }
        None => table,
    };

    tbl.get(leaf)
}

fn flatten_into(table: &Table, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in table {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(sub) => flatten_into(sub, &dotted, out),
            other => out.push((dotted, other.clone())),
        }
    }
}
