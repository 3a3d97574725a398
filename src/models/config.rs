//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::services::calendar::DEFAULT_DAY_LIMIT;

/// Which store backs the API.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite through Diesel.
    #[default]
    Sqlite,
    /// Volatile in-memory store.
    Memory,
    /// One JSON file per collection under `data_dir`.
    Json,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: default_database_url(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_database_url() -> String {
    "app.db".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_day_limit() -> usize {
    DEFAULT_DAY_LIMIT
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Appointments listed per calendar day before the rest are hidden.
    #[serde(default = "default_day_limit")]
    pub calendar_day_limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_defaults_to_sqlite() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"address":"127.0.0.1","port":8080}"#).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.calendar_day_limit, DEFAULT_DAY_LIMIT);
    }

    #[test]
    fn backend_names_are_lowercase() {
        let storage: StorageConfig =
            serde_json::from_str(r#"{"backend":"json","data_dir":"/tmp/studio"}"#).unwrap();

        assert_eq!(storage.backend, StorageBackend::Json);
        assert_eq!(storage.data_dir, "/tmp/studio");
        assert_eq!(storage.database_url, "app.db");
    }
}
