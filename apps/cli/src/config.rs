//! CLI configuration.
//!
//! ## Resolution Order
//! ```text
//! database path     --db <PATH>  →  DIETA_DB_PATH  →  <data dir>/dieta.db
//! max connections   DIETA_DB_MAX_CONNECTIONS  →  5
//! log filter        RUST_LOG  →  "info,dieta=debug,sqlx=warn"
//! ```
//!
//! Data directory per platform:
//! - **Linux**: `~/.local/share/dieta/dieta.db`
//! - **macOS**: `~/Library/Application Support/com.dieta.dieta/dieta.db`
//! - **Windows**: `%APPDATA%\dieta\dieta\data\dieta.db`

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "DIETA_DB_PATH";
pub const MAX_CONNECTIONS_VAR: &str = "DIETA_DB_MAX_CONNECTIONS";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DB_FILE_NAME: &str = "dieta.db";

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,
}

impl CliConfig {
    /// Loads configuration from the `--db` flag and the environment.
    pub fn load(db_flag: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve(
            db_flag,
            env::var(DB_PATH_VAR).ok(),
            env::var(MAX_CONNECTIONS_VAR).ok(),
        )
    }

    fn resolve(
        db_flag: Option<PathBuf>,
        db_env: Option<String>,
        max_connections: Option<String>,
    ) -> Result<Self, ConfigError> {
        let database_path = match db_flag.or_else(|| db_env.map(PathBuf::from)) {
            Some(path) => path,
            None => default_database_path()?,
        };

        let max_connections = match max_connections {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue(MAX_CONNECTIONS_VAR.to_string()))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(CliConfig {
            database_path,
            max_connections,
        })
    }
}

/// Platform data directory, created on first use.
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "dieta", "dieta").ok_or(ConfigError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::CreateDataDir {
        path: data_dir.to_path_buf(),
        source,
    })?;

    Ok(data_dir.join(DB_FILE_NAME))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory {path:?}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_env() {
        let config = CliConfig::resolve(
            Some(PathBuf::from("/tmp/flag.db")),
            Some("/tmp/env.db".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/flag.db"));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_env_path_and_pool_size() {
        let config =
            CliConfig::resolve(None, Some("/tmp/env.db".to_string()), Some("2".to_string()))
                .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/env.db"));
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn test_invalid_pool_size() {
        for raw in ["zero", "0", "-1"] {
            let err = CliConfig::resolve(
                Some(PathBuf::from("/tmp/x.db")),
                None,
                Some(raw.to_string()),
            )
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(ref var) if var == MAX_CONNECTIONS_VAR));
        }
    }
}
