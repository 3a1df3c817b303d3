//! Clap adapter for mandrel.
//!
//! Compiled only with the `clap` Cargo feature (on by default). Provides
//! [`BootstrapArgs`], a derive type to embed in an application's own clap
//! parser. It gives the app `--root` / `--bootstrap-name` flags and a
//! `show|paths|get` subcommand group.
//!
//! The bridge to the core is two calls: [`BootstrapArgs::overrides()`] feeds
//! [`MandrelBuilder::overrides()`](crate::MandrelBuilder::overrides), and
//! [`BootstrapArgs::into_action()`] produces a [`BootstrapAction`] for
//! [`MandrelBuilder::handle()`](crate::MandrelBuilder::handle).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::{BootstrapAction, Overrides};

/// Clap-derived args for a `bootstrap` subcommand group.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Bootstrap(BootstrapArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct BootstrapArgs {
    /// Use this directory as the project root instead of searching for the
    /// bootstrap file (takes precedence over MANDREL_ROOT).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Bootstrap file name to look for (takes precedence over
    /// MANDREL_BOOTSTRAP_NAME).
    #[arg(long, global = true, value_name = "FILE")]
    pub bootstrap_name: Option<String>,

    #[command(subcommand)]
    pub action: Option<BootstrapSubcommand>,
}

/// Available bootstrap subcommands.
#[derive(Debug, Subcommand)]
pub enum BootstrapSubcommand {
    /// Show the resolved root, bootstrap file, search paths and config.
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the search paths, one per line, highest priority first.
    Paths,
    /// Print one resolved config value.
    Get {
        /// Dotted key path (e.g. "database.url").
        key: String,
    },
}

impl BootstrapArgs {
    /// The `--root` / `--bootstrap-name` values, for the builder.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            bootstrap_name: self.bootstrap_name.clone(),
        }
    }

    /// Bare `bootstrap` (no subcommand) maps to `Show { json: false }`.
    pub fn into_action(self) -> BootstrapAction {
        match self.action {
            None => BootstrapAction::Show { json: false },
            Some(BootstrapSubcommand::Show { json }) => BootstrapAction::Show { json },
            Some(BootstrapSubcommand::Paths) => BootstrapAction::Paths,
            Some(BootstrapSubcommand::Get { key }) => BootstrapAction::Get { key },
        }
    }
}
