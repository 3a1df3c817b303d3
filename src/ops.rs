//! Reports over a resolved session: the logic behind `show`, `paths` and
//! `get`, and the `Report` type callers display.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use toml::Value;

use crate::error::MandrelError;
use crate::state::Session;
use crate::types::BootstrapAction;

/// Result of a report action. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Human-readable view of the whole session.
    Summary(SessionSummary),
    /// The same view rendered as pretty JSON.
    Json(String),
    /// Search paths in priority order.
    Paths(Vec<PathBuf>),
    /// One resolved config value.
    KeyValue { key: String, value: String },
}

/// Serializable projection of a [`Session`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub root_path: PathBuf,
    pub bootstrap_file: PathBuf,
    pub bootstrap_file_loaded: bool,
    pub search_paths: Vec<PathBuf>,
    pub logging_config_basename: String,
    pub config: Vec<(String, String)>,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        let state = session.bootstrap();
        Self {
            root_path: state.root_path().to_path_buf(),
            bootstrap_file: state.bootstrap_file().to_path_buf(),
            bootstrap_file_loaded: state.bootstrap_file_loaded(),
            search_paths: state.search_paths().as_slice().to_vec(),
            logging_config_basename: state.logging_config_basename().to_string(),
            config: session
                .config()
                .entries()
                .into_iter()
                .map(|(k, v)| (k, format_value(&v)))
                .collect(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Summary(summary) => write!(f, "{summary}"),
            Report::Json(json) => write!(f, "{json}"),
            Report::Paths(paths) => {
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", path.display())?;
                }
                Ok(())
            }
            Report::KeyValue { key, value } => write!(f, "{key} = {value}"),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "root_path = {}", self.root_path.display())?;
        let status = if self.bootstrap_file_loaded {
            "loaded"
        } else {
            "not found"
        };
        writeln!(
            f,
            "bootstrap_file = {} ({status})",
            self.bootstrap_file.display()
        )?;
        writeln!(f, "logging_config_basename = {}", self.logging_config_basename)?;
        write!(f, "search_paths =")?;
        for path in &self.search_paths {
            write!(f, "\n  {}", path.display())?;
        }
        for (key, value) in &self.config {
            write!(f, "\nconfig.{key} = {value}")?;
        }
        Ok(())
    }
}

/// Build the report for `action`.
pub fn report(session: &Session, action: &BootstrapAction) -> Result<Report, MandrelError> {
    match action {
        BootstrapAction::Show { json: false } => {
            Ok(Report::Summary(SessionSummary::from_session(session)))
        }
        BootstrapAction::Show { json: true } => {
            let summary = SessionSummary::from_session(session);
            serde_json::to_string_pretty(&summary)
                .map(Report::Json)
                .map_err(|e| MandrelError::InvalidValue {
                    key: "<session>".into(),
                    reason: e.to_string(),
                })
        }
        BootstrapAction::Paths => Ok(Report::Paths(
            session.search_paths().as_slice().to_vec(),
        )),
        BootstrapAction::Get { key } => {
            let value = session
                .config()
                .get(key)
                .ok_or_else(|| MandrelError::KeyNotFound(key.clone()))?;
            Ok(Report::KeyValue {
                key: key.clone(),
                value: format_value(&value),
            })
        }
    }
}

/// Format a TOML value for display.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(a) => Value::Array(a.clone()).to_string(),
        Value::Table(t) => Value::Table(t.clone()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::state::BootstrapState;

    fn session() -> Session {
        let mut state = BootstrapState::new("/srv/app", "/srv/app/Mandrel.toml");
        state.append_search_path("/etc/app");
        let mut config = Configuration::new();
        config.set("database.url", "pg://").unwrap();
        config.set("port", 3000).unwrap();
        Session::new(state, config)
    }

    #[test]
    fn show_summary_lists_everything() {
        let report = report(&session(), &BootstrapAction::Show { json: false }).unwrap();
        let text = report.to_string();
        assert!(text.contains("root_path = /srv/app"));
        assert!(text.contains("bootstrap_file = /srv/app/Mandrel.toml (not found)"));
        assert!(text.contains("logging_config_basename = logging.cfg"));
        assert!(text.contains("  /etc/app"));
        assert!(text.contains("config.database.url = pg://"));
        assert!(text.contains("config.port = 3000"));
    }

    #[test]
    fn show_json_is_parseable() {
        let report = report(&session(), &BootstrapAction::Show { json: true }).unwrap();
        let Report::Json(json) = report else {
            panic!("Expected Json report");
        };
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["root_path"], "/srv/app");
        assert_eq!(parsed["search_paths"][1], "/etc/app");
        assert_eq!(parsed["logging_config_basename"], "logging.cfg");
        assert_eq!(parsed["bootstrap_file_loaded"], false);
    }

    #[test]
    fn paths_one_per_line() {
        let report = report(&session(), &BootstrapAction::Paths).unwrap();
        assert_eq!(report.to_string(), "/srv/app\n/etc/app");
    }

    #[test]
    fn get_existing_key() {
        let report = report(
            &session(),
            &BootstrapAction::Get {
                key: "database.url".into(),
            },
        )
        .unwrap();
        assert_eq!(report.to_string(), "database.url = pg://");
    }

    #[test]
    fn get_missing_key_errors() {
        let result = report(
            &session(),
            &BootstrapAction::Get {
                key: "nope".into(),
            },
        );
        assert!(matches!(result, Err(MandrelError::KeyNotFound(k)) if k == "nope"));
    }

    #[test]
    fn format_array_value() {
        let v = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(format_value(&v), "[1, 2]");
    }
}
