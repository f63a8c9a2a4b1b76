//! Catalog configuration.

use std::path::PathBuf;

/// Default location of the catalog snapshot.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/movies.json";

/// Catalog store configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON array of movie records loaded at startup
    pub snapshot_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

impl CatalogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            snapshot_path: std::env::var("CATALOG_SNAPSHOT_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_from_env_default() {
        std::env::remove_var("CATALOG_SNAPSHOT_PATH");
        let config = CatalogConfig::from_env();
        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT_PATH));
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        std::env::set_var("CATALOG_SNAPSHOT_PATH", "/srv/catalog/movies.json");
        let config = CatalogConfig::from_env();
        assert_eq!(
            config.snapshot_path,
            PathBuf::from("/srv/catalog/movies.json")
        );
        std::env::remove_var("CATALOG_SNAPSHOT_PATH");
    }
}
