#[cfg(test)]
pub mod test {
    use confique::Config;
    use serde::{Deserialize, Serialize};

    /// Typed view over the `[config]` section used by extraction tests.
    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct ServiceConfig {
        /// Service name.
        #[config(default = "service")]
        pub name: String,

        /// Listening port.
        #[config(default = 8080)]
        pub port: u16,

        /// Database settings.
        #[config(nested)]
        pub database: DatabaseConfig,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct DatabaseConfig {
        /// Connection string URL.
        pub url: Option<String>,

        /// Connection pool size.
        #[config(default = 5)]
        pub pool_size: usize,
    }

    /// Config with a required field and no default.
    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct RequiredConfig {
        pub token: String,
    }

    #[test]
    fn service_config_loads_defaults() {
        let config = ServiceConfig::builder().load().unwrap();
        assert_eq!(config.name, "service");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 5);
    }
}
