//! Zero-configuration project-root discovery for Rust applications.
//!
//! Mandrel finds your project root by walking up from the working directory
//! to the nearest bootstrap file (`Mandrel.toml`), applies that file, and
//! keeps the result as process-wide state:
//!
//! ```ignore
//! let session = mandrel::initialize()?;
//! for dir in session.search_paths() {
//!     // look for your own config files here
//! }
//! ```
//!
//! # What a cycle resolves
//!
//! | Field | Default | Changed by |
//! |-------|---------|------------|
//! | `root_path` | directory holding the bootstrap file | `MANDREL_ROOT` |
//! | `bootstrap_file` | the file found | `MANDREL_ROOT`, `MANDREL_BOOTSTRAP_NAME` |
//! | `search_paths` | `[root_path]` | `[bootstrap] search_paths` appends |
//! | `logging_config_basename` | `"logging.cfg"` | `[bootstrap] logging_config_basename` |
//!
//! Alongside these, a [`Configuration`] handle collects the bootstrap file's
//! `[config]` table and `MANDREL__*` variables for downstream code.
//!
//! # Discovery
//!
//! ```text
//! MANDREL_ROOT unset                     MANDREL_ROOT=/srv/app
//! ──────────────────                     ─────────────────────
//! cwd/Mandrel.toml?                      /srv/app/Mandrel.toml?
//! cwd/../Mandrel.toml?                     found   → evaluate it
//! ...                                      missing → defaults, no error
//! /Mandrel.toml?
//!   found   → root = its directory
//!   missing → MissingBootstrap
//! ```
//!
//! `MANDREL_BOOTSTRAP_NAME` replaces the file name in both columns. Empty
//! variables count as unset. [`MandrelBuilder`] can force both values ahead
//! of the environment, change the prefix, or start from another directory.
//!
//! # The bootstrap file
//!
//! A bootstrap file is declarative TOML, not a script. It acts on two
//! handles: `[bootstrap]` on the [`BootstrapState`] being built and
//! `[config]` on the [`Configuration`]. Both are the objects that end up in
//! the [`Session`], so what the file does is exactly what consumers see.
//!
//! ```toml
//! [bootstrap]
//! search_paths = ["/etc/myapp", "/opt/myapp/conf"]
//! logging_config_basename = "myapp-logging.cfg"
//!
//! [config]
//! name = "myapp"
//! ```
//!
//! Search paths are appended verbatim and in order; nothing is de-duplicated
//! or removed. Unknown keys outside `[config]` are rejected with a line number
//! unless [`strict(false)`](MandrelBuilder::strict) is set.
//!
//! # Lifecycle
//!
//! [`initialize`] runs a full cycle and installs the [`Session`]. Running it
//! again replaces the session entirely. If a cycle fails, the previous
//! session (if any) stays active and [`phase`] reports [`Phase::Failed`].
//! [`MandrelBuilder::load`] runs a cycle without installing anything.
//!
//! Initialization is meant to happen once, early, on one thread. The slot is
//! lock-protected, but two concurrent cycles simply race to install.
//!
//! # Error handling
//!
//! All fallible operations return [`MandrelError`].
//! [`is_missing_bootstrap()`](MandrelError::is_missing_bootstrap) marks the
//! one discovery failure; [`is_evaluation_error()`](MandrelError::is_evaluation_error)
//! covers a bootstrap file that was found but could not be read or applied.
//!
//! # Logging
//!
//! Mandrel emits `tracing` events (phase transitions at `debug`, a summary at
//! `info`) and never installs a subscriber itself.

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod config;
mod env;
mod eval;
mod file;
mod global;
mod ops;
mod paths;
mod state;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Mandrel, MandrelBuilder};
#[cfg(feature = "clap")]
pub use cli::{BootstrapArgs, BootstrapSubcommand};
pub use config::Configuration;
pub use error::MandrelError;
pub use global::{current, initialize, phase, reset};
pub use ops::{Report, SessionSummary};
pub use paths::SearchPaths;
pub use state::{BootstrapState, Session};
pub use types::{
    BootstrapAction, DEFAULT_BOOTSTRAP_NAME, DEFAULT_ENV_PREFIX, DEFAULT_LOGGING_CONFIG_BASENAME,
    Overrides, Phase,
};
