//! Bootstrap file evaluation.
//!
//! A bootstrap file is a TOML document with two optional sections, one per
//! handle in the [`EvalScope`]:
//!
//! ```toml
//! [bootstrap]
//! search_paths = ["/etc/myapp", "conf"]     # appended verbatim, in order
//! logging_config_basename = "myapp-logging.cfg"
//!
//! [config]
//! name = "myapp"
//! [config.database]
//! url = "postgres://localhost"
//! ```
//!
//! Directives are applied to the live session objects in a fixed order:
//! search-path appends, then the logging basename, then the `[config]` merge.
//! Nothing is applied unless the whole document parses (and, in strict mode,
//! contains no unknown keys).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::Table;

use crate::error::MandrelError;
use crate::state::EvalScope;
use crate::validate;

#[derive(Debug, Default, Deserialize)]
struct BootstrapDocument {
    bootstrap: Option<BootstrapDirectives>,
    config: Option<Table>,
}

#[derive(Debug, Default, Deserialize)]
struct BootstrapDirectives {
    search_paths: Option<Vec<PathBuf>>,
    logging_config_basename: Option<String>,
}

/// Read and apply the bootstrap file at `path`.
pub fn evaluate(path: &Path, scope: EvalScope<'_>, strict: bool) -> Result<(), MandrelError> {
    let content = std::fs::read_to_string(path).map_err(|e| MandrelError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    evaluate_str(&content, path, scope, strict)
}

/// Apply bootstrap `content`; `path` is only used for error reporting.
pub fn evaluate_str(
    content: &str,
    path: &Path,
    scope: EvalScope<'_>,
    strict: bool,
) -> Result<(), MandrelError> {
    let document: BootstrapDocument = if strict {
        validate::parse_strict(content, path)?
    } else {
        validate::parse_lenient(content, path)?
    };

    let EvalScope { bootstrap, config } = scope;

    if let Some(directives) = document.bootstrap {
        for dir in directives.search_paths.unwrap_or_default() {
            tracing::debug!(path = %dir.display(), "appending search path");
            bootstrap.append_search_path(dir);
        }
        if let Some(basename) = directives.logging_config_basename {
            bootstrap.set_logging_config_basename(basename);
        }
    }

    if let Some(table) = document.config {
        config.merge_file_layer(table);
    }

    bootstrap.mark_loaded();
    Ok(())
}
