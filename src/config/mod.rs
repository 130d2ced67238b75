use crate::filesystem::FileSystemMessageStore;
use crate::store::{JsonMessageStore, MessageAcceptor, MessageProvider};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No message source configured")]
    MissingSource,

    #[error("No import target configured")]
    MissingTarget,
}

/// A storage backend location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreLocation {
    /// Directory of `.properties` bundles
    Directory { path: PathBuf },
    /// Single JSON document
    Json { path: PathBuf },
}

impl StoreLocation {
    pub fn open_provider(&self) -> Arc<dyn MessageProvider> {
        match self {
            StoreLocation::Directory { path } => Arc::new(FileSystemMessageStore::new(path)),
            StoreLocation::Json { path } => Arc::new(JsonMessageStore::new(path)),
        }
    }

    pub fn open_acceptor(&self) -> Arc<dyn MessageAcceptor> {
        match self {
            StoreLocation::Directory { path } => Arc::new(FileSystemMessageStore::new(path)),
            StoreLocation::Json { path } => Arc::new(JsonMessageStore::new(path)),
        }
    }

    /// Resolve a relative path against `base`
    fn relative_to(self, base: &Path) -> Self {
        match self {
            StoreLocation::Directory { path } => StoreLocation::Directory {
                path: base.join(path),
            },
            StoreLocation::Json { path } => StoreLocation::Json {
                path: base.join(path),
            },
        }
    }
}

/// Import configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<StoreLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<StoreLocation>,
    /// Base names to import. Empty means every base name the source knows.
    #[serde(default)]
    pub base_names: Vec<String>,
    #[serde(default)]
    pub dry_run: bool,
}

impl ImportConfig {
    /// Overlay `other` on top of this configuration.
    ///
    /// Locations and base names set in `other` win; dry run is sticky.
    pub fn merge(self, other: ImportConfig) -> Self {
        Self {
            source: other.source.or(self.source),
            target: other.target.or(self.target),
            base_names: if other.base_names.is_empty() {
                self.base_names
            } else {
                other.base_names
            },
            dry_run: self.dry_run || other.dry_run,
        }
    }

    pub fn source(&self) -> Result<&StoreLocation, ConfigError> {
        self.source.as_ref().ok_or(ConfigError::MissingSource)
    }

    pub fn target(&self) -> Result<&StoreLocation, ConfigError> {
        self.target.as_ref().ok_or(ConfigError::MissingTarget)
    }
}

/// Read a configuration file.
///
/// Relative store paths are resolved against the file's directory.
pub async fn read_config(config_path: &Path) -> Result<ImportConfig, ConfigError> {
    let content = fs::read_to_string(config_path).await?;
    let config: ImportConfig = serde_json::from_str(&content)?;

    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    Ok(ImportConfig {
        source: config.source.map(|s| s.relative_to(base)),
        target: config.target.map(|t| t.relative_to(base)),
        ..config
    })
}
