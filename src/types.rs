//! Shared vocabulary: defaults, search modes, lifecycle phases and report
//! actions.
//!
//! # Discovery modes
//!
//! Where the bootstrap file is looked for depends on whether the root was
//! forced (environment `{PREFIX}_ROOT` or a builder override):
//!
//! - **Not forced**: an upward walk from the start directory (the CWD
//!   by default) toward the filesystem root. The first directory holding the
//!   file becomes the root. A miss is fatal
//!   ([`MissingBootstrap`](crate::MandrelError::MissingBootstrap)).
//! - **Forced**: a single-directory check: only `{root}/{file_name}` is
//!   checked. A miss is not an error; the session keeps its defaults.
//!
//! # Lifecycle
//!
//! A cycle moves through [`Phase`] in order:
//!
//! ```text
//! Uninitialized → ResolvingRoot → SearchingFile → Evaluating → Ready
//!                                       ↘              ↘
//!                                        Failed         Failed
//! ```

use std::path::PathBuf;

/// File name searched for when no override is given.
pub const DEFAULT_BOOTSTRAP_NAME: &str = "Mandrel.toml";

/// Logging-config basename used when the bootstrap file does not set one.
pub const DEFAULT_LOGGING_CONFIG_BASENAME: &str = "logging.cfg";

/// Prefix for the override variables (`MANDREL_ROOT`, `MANDREL_BOOTSTRAP_NAME`)
/// and for config-layer variables (`MANDREL__*`).
pub const DEFAULT_ENV_PREFIX: &str = "MANDREL";

/// How the directory walker looks for the bootstrap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkMode {
    /// Check the start directory, then each parent up to the filesystem root.
    Upward,
    /// Check the start directory only.
    SingleDirectory,
}

/// Where a bootstrap cycle is, or where the last one ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    ResolvingRoot,
    SearchingFile,
    Evaluating,
    Ready,
    Failed,
}

/// A report operation over a resolved session, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapAction {
    /// Everything: root, bootstrap file, search paths, logging basename, config.
    Show { json: bool },
    /// Search paths only, one per line, in priority order.
    Paths,
    /// A single config value by dotted key.
    Get { key: String },
}

/// Explicit values that take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub bootstrap_name: Option<String>,
}
