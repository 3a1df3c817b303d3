//! Bootstrap state and the session that pairs it with the configuration
//! handle.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Configuration;
use crate::paths::SearchPaths;
use crate::types::DEFAULT_LOGGING_CONFIG_BASENAME;

/// What a bootstrap cycle resolved.
///
/// Built fresh on every cycle; nothing carries over from a previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapState {
    root_path: PathBuf,
    bootstrap_file: PathBuf,
    bootstrap_file_loaded: bool,
    search_paths: SearchPaths,
    logging_config_basename: String,
}

impl BootstrapState {
    /// Defaults for `root_path`: search paths `[root_path]`, default logging basename.
    pub fn new(root_path: impl Into<PathBuf>, bootstrap_file: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        Self {
            search_paths: SearchPaths::seeded(root_path.clone()),
            root_path,
            bootstrap_file: bootstrap_file.into(),
            bootstrap_file_loaded: false,
            logging_config_basename: DEFAULT_LOGGING_CONFIG_BASENAME.to_string(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The file that was evaluated, or would have been if it existed.
    ///
    /// With a forced root this is `{root}/{file_name}` whether or not the file
    /// is there; see [`bootstrap_file_loaded`](Self::bootstrap_file_loaded).
    pub fn bootstrap_file(&self) -> &Path {
        &self.bootstrap_file
    }

    pub fn bootstrap_file_loaded(&self) -> bool {
        self.bootstrap_file_loaded
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    pub fn logging_config_basename(&self) -> &str {
        &self.logging_config_basename
    }

    pub(crate) fn append_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.append(path);
    }

    pub(crate) fn set_logging_config_basename(&mut self, basename: String) {
        self.logging_config_basename = basename;
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.bootstrap_file_loaded = true;
    }
}

/// The two handles a bootstrap file acts on, lent for the duration of one
/// evaluation. Both borrow the session's own objects, so every mutation is
/// visible once evaluation returns.
pub struct EvalScope<'a> {
    pub bootstrap: &'a mut BootstrapState,
    pub config: &'a mut Configuration,
}

/// The result of one bootstrap cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    bootstrap: BootstrapState,
    config: Configuration,
}

impl Session {
    pub fn new(bootstrap: BootstrapState, config: Configuration) -> Self {
        Self { bootstrap, config }
    }

    pub fn bootstrap(&self) -> &BootstrapState {
        &self.bootstrap
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Shorthand for `self.bootstrap().root_path()`.
    pub fn root_path(&self) -> &Path {
        self.bootstrap.root_path()
    }

    pub fn search_paths(&self) -> &SearchPaths {
        self.bootstrap.search_paths()
    }

    pub(crate) fn scope(&mut self) -> EvalScope<'_> {
        EvalScope {
            bootstrap: &mut self.bootstrap,
            config: &mut self.config,
        }
    }
}
