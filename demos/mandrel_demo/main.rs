//! # mandrel demo application
//!
//! A small CLI that bootstraps itself with mandrel and prints what it found.
//! It exists to exercise the library by hand.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example mandrel_demo -- bootstrap
//! RUST_LOG=mandrel=debug cargo run --example mandrel_demo -- echo
//! ```
//!
//! | Feature                 | How to exercise it                                                 |
//! |-------------------------|--------------------------------------------------------------------|
//! | Upward discovery        | Put a `Mandrel.toml` in a parent dir, run from a subdirectory      |
//! | Missing bootstrap       | Run from a directory tree with no `Mandrel.toml`                   |
//! | Forced root             | `MANDREL_ROOT=/tmp cargo run --example mandrel_demo -- bootstrap`  |
//! | Custom file name        | `MANDREL_BOOTSTRAP_NAME=dev.toml ... -- bootstrap`                 |
//! | CLI override            | `... -- bootstrap --root /tmp paths`                               |
//! | JSON report             | `... -- bootstrap show --json`                                     |
//! | Typed config            | `... -- echo` (reads `[config]` into `DemoConfig`)                 |
//! | Config env layer        | `MANDREL__SERVER__PORT=9999 ... -- echo`                           |

mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mandrel::{BootstrapArgs, Mandrel};

use config::DemoConfig;

/// mandrel demo: bootstraps from the nearest Mandrel.toml.
#[derive(Parser, Debug)]
#[command(name = "mandrel-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect the bootstrap result (show, paths, get).
    Bootstrap(BootstrapArgs),
    /// Install the session globally and print the typed demo config.
    Echo,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bootstrap(args) => {
            let builder = Mandrel::builder().overrides(args.overrides());
            let action = args.into_action();
            builder.handle_and_print(&action).unwrap_or_else(|e| {
                eprintln!("Bootstrap error:\n{e}");
                std::process::exit(1);
            });
        }
        Commands::Echo => {
            let session = mandrel::initialize().unwrap_or_else(|e| {
                eprintln!("Bootstrap error:\n{e}");
                std::process::exit(1);
            });
            let config: DemoConfig = session.config().extract().unwrap_or_else(|e| {
                eprintln!("Failed to load config:\n{e}");
                std::process::exit(1);
            });

            println!("{} (root: {})", config.name, session.root_path().display());
            println!("listening on {}:{}", config.server.host, config.server.port);
            println!(
                "logging config: {}",
                session.bootstrap().logging_config_basename()
            );
            for dir in session.search_paths() {
                println!("  search {}", dir.display());
            }
        }
    }
}
