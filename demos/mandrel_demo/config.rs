//! Typed settings for the demo, extracted from the `[config]` section of the
//! bootstrap file.
//!
//! | Bootstrap file key       | Env var                          |
//! |--------------------------|----------------------------------|
//! | `[config] name`          | `MANDREL__NAME`                  |
//! | `[config.server] host`   | `MANDREL__SERVER__HOST`          |
//! | `[config.server] port`   | `MANDREL__SERVER__PORT`          |

use confique::Config;
use serde::{Deserialize, Serialize};

#[derive(Config, Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Application name shown in the echo banner.
    #[config(default = "mandrel-demo")]
    pub name: String,

    #[config(nested)]
    pub server: ServerConfig,
}

#[derive(Config, Serialize, Deserialize, Debug)]
pub struct ServerConfig {
    /// Hostname to bind to.
    #[config(default = "127.0.0.1")]
    pub host: String,

    /// Port number.
    #[config(default = 3000)]
    pub port: u16,
}
