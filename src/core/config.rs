use super::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Per-item byte quota of the browser sync store; values above this go local.
pub const DEFAULT_SYNC_QUOTA_BYTES: usize = 8192;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Optional overrides read from `config.toml` in the base directory.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    storage: StorageSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
struct StorageSection {
    sync_quota_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingSection {
    level: Option<String>,
}

/// Configuration for marklog
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for marklog data
    pub base_dir: PathBuf,
    /// Primary (synchronized) key-value database
    pub sync_db_path: PathBuf,
    /// Secondary (local-only) key-value database
    pub local_db_path: PathBuf,
    /// Default target directory for exported backups
    pub backups_dir: PathBuf,
    /// Log file written by the tracing subscriber
    pub log_path: PathBuf,
    /// Optional user configuration file
    pub config_path: PathBuf,
    /// Largest value the sync store accepts before falling back
    pub sync_quota_bytes: usize,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Get the default configuration directory
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
            .map(|home| home.join(".marklog"))
    }

    /// Create a new configuration, reading `config.toml` if one exists
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.unwrap_or_else(|| {
            Self::default_base_dir().unwrap_or_else(|_| PathBuf::from(".marklog"))
        });

        let mut config = Self {
            sync_db_path: base_dir.join("store").join("sync.redb"),
            local_db_path: base_dir.join("store").join("local.redb"),
            backups_dir: base_dir.join("backups"),
            log_path: base_dir.join("marklog.log"),
            config_path: base_dir.join("config.toml"),
            sync_quota_bytes: DEFAULT_SYNC_QUOTA_BYTES,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            base_dir,
        };

        if config.config_path.exists() {
            config.apply_file()?;
        }

        Ok(config)
    }

    fn apply_file(&mut self) -> Result<()> {
        let raw = std::fs::read_to_string(&self.config_path)?;
        let file: FileConfig = toml::from_str(&raw).map_err(|e| {
            Error::Config(format!(
                "Failed to parse {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        if let Some(quota) = file.storage.sync_quota_bytes {
            if quota == 0 {
                return Err(Error::Config(
                    "storage.sync_quota_bytes must be greater than zero".to_string(),
                ));
            }
            self.sync_quota_bytes = quota;
        }
        if let Some(level) = file.logging.level {
            self.log_level = level;
        }
        Ok(())
    }

    /// Initialize the configuration directories
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(&self.backups_dir)?;
        if let Some(store_dir) = self.sync_db_path.parent() {
            std::fs::create_dir_all(store_dir)?;
        }
        Ok(())
    }

    /// Check if the configuration is already initialized
    pub fn is_initialized(&self) -> bool {
        self.base_dir.exists()
            && self
                .sync_db_path
                .parent()
                .map(|dir| dir.exists())
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_derive_from_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(config.sync_db_path, temp_dir.path().join("store/sync.redb"));
        assert_eq!(config.local_db_path, temp_dir.path().join("store/local.redb"));
        assert_eq!(config.sync_quota_bytes, DEFAULT_SYNC_QUOTA_BYTES);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_init_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(Some(temp_dir.path().join("marklog"))).unwrap();

        assert!(!config.is_initialized());
        config.init().unwrap();
        assert!(config.is_initialized());
        assert!(config.backups_dir.exists());
    }

    #[test]
    fn test_config_file_overrides() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "[storage]\nsync_quota_bytes = 64\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.sync_quota_bytes, 64);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_file_rejects_zero_quota() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "[storage]\nsync_quota_bytes = 0\n",
        )
        .unwrap();

        assert!(matches!(
            Config::new(Some(temp_dir.path().to_path_buf())),
            Err(Error::Config(_))
        ));
    }
}
