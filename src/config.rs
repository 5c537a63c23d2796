use crate::error::{EtlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where extracts are read from and written to, and how the warehouse loads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub raw_dir: PathBuf,
    pub prepared_dir: PathBuf,
    pub warehouse_path: PathBuf,
    /// Turn on SQLite FK enforcement and load dimensions before facts
    pub enforce_foreign_keys: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self::from_data_dir("data")
    }
}

impl EtlConfig {
    /// `<dir>/raw`, `<dir>/prepared`, `<dir>/dw/smart_sales.db`
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        EtlConfig {
            raw_dir: dir.join("raw"),
            prepared_dir: dir.join("prepared"),
            warehouse_path: dir.join("dw").join("smart_sales.db"),
            enforce_foreign_keys: false,
        }
    }

    /// Read a TOML file; missing keys fall back to the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EtlError::Config(e.to_string()))
    }

    pub fn raw_file(&self, name: &str) -> PathBuf {
        self.raw_dir.join(name)
    }

    pub fn prepared_file(&self, name: &str) -> PathBuf {
        self.prepared_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = EtlConfig::default();
        assert_eq!(config.raw_dir, PathBuf::from("data/raw"));
        assert_eq!(config.prepared_dir, PathBuf::from("data/prepared"));
        assert_eq!(config.warehouse_path, PathBuf::from("data/dw/smart_sales.db"));
        assert!(!config.enforce_foreign_keys);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EtlConfig::from_toml(
            r#"
            warehouse_path = "/tmp/dw.db"
            enforce_foreign_keys = true
            "#,
        )
        .unwrap();

        assert_eq!(config.warehouse_path, PathBuf::from("/tmp/dw.db"));
        assert!(config.enforce_foreign_keys);
        assert_eq!(config.raw_dir, PathBuf::from("data/raw"));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = EtlConfig::from_toml("raw_dir = [").unwrap_err();
        assert!(matches!(err, EtlError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EtlConfig::load(Path::new("/nonexistent/etl.toml")).unwrap_err();
        assert!(err.to_string().contains("etl.toml"));
    }
}
