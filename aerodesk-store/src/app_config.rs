use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub fares: FareRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on restart.
    Memory,
    /// One pretty-printed JSON array per collection under `data_dir`.
    File,
    /// Postgres JSONB documents, needs `database.url`.
    Document,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

/// Checkout pricing: `base * passengers * (1 + tax_rate) + service_fee`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct FareRules {
    pub tax_rate: f64,
    pub service_fee: f64,
}

impl Default for FareRules {
    fn default() -> Self {
        Self {
            tax_rate: 0.18,
            service_fee: 15.0,
        }
    }
}

impl Config {
    /// Built-in defaults; every file source on top of these is optional.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let fares = FareRules::default();
        config::Config::builder()
            .set_default("server.port", 5000_i64)?
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", "data")?
            .set_default("fares.tax_rate", fares.tax_rate)?
            .set_default("fares.service_fee", fares.service_fee)
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::builder()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `AERODESK__STORAGE__BACKEND=memory`
            .add_source(config::Environment::with_prefix("AERODESK").separator("__"))
            // Bare `PORT` wins, as most hosting platforms set only that.
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_any_source() {
        let config: Config = Config::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.fares, FareRules::default());
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_string_overrides_are_parsed() {
        let config: Config = Config::builder()
            .unwrap()
            .set_override("server.port", "8080")
            .unwrap()
            .set_override("storage.backend", "document")
            .unwrap()
            .set_override("database.url", "postgres://localhost/aerodesk")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Document);
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/aerodesk"));
    }
}
