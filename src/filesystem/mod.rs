//! Message catalogs stored as `.properties` files in a directory tree.

mod naming;
mod properties;

pub use naming::{bundle_file_name, match_bundle_file, split_bundle_stem};
pub use properties::{parse_properties, write_properties, PropertiesError};

use crate::messages::{Locale, LocaleMessages, Messages};
use crate::store::{MessageAcceptor, MessageProvider, StoreError};
use crate::utils::{now_iso, write_atomic};
use async_trait::async_trait;
use naming::{bundle_stem, resolve_base_name};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// First header line of every written bundle file
const GENERATED_HEADER: &str = "Generated by messagesource";

/// A directory of property bundles, one file per (base name, locale).
#[derive(Debug, Clone)]
pub struct FileSystemMessageStore {
    root: PathBuf,
}

impl FileSystemMessageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fail with NotFound when the root directory is missing
    fn ensure_root(&self) -> Result<(), StoreError> {
        if self.root.is_dir() {
            return Ok(());
        }
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Message directory not found: {}", self.root.display()),
        )
        .into())
    }

    /// Files in `dir` belonging to the bundle `stem`, ordered by locale
    async fn bundle_files(
        &self,
        dir: &Path,
        stem: &str,
    ) -> Result<Vec<(PathBuf, Option<Locale>)>, StoreError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                if let Some(locale) = match_bundle_file(file_name, stem) {
                    files.push((entry.path(), locale));
                }
            }
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }
}

/// Read and parse one bundle file
async fn read_bundle_file(path: &Path) -> Result<LocaleMessages, StoreError> {
    let bytes = fs::read(path).await?;
    properties::parse_properties(&properties::decode(&bytes)).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        line: e.line,
        message: e.message,
    })
}

#[async_trait]
impl MessageProvider for FileSystemMessageStore {
    async fn get_messages(&self, base_name: &str) -> Result<Option<Messages>, StoreError> {
        self.ensure_root()?;
        let (dir, stem) = resolve_base_name(&self.root, base_name)?;

        let files = self.bundle_files(&dir, stem).await?;
        if files.is_empty() {
            return Ok(None);
        }

        let mut messages = Messages::new();
        for (path, locale) in files {
            let entries = read_bundle_file(&path).await?;
            debug!(path = %path.display(), entries = entries.len(), "Read bundle file");
            messages.extend_locale(locale.as_ref(), entries);
        }

        Ok(Some(messages))
    }

    async fn available_base_names(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_root()?;

        let mut names = BTreeSet::new();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|e| {
                e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "Directory loop detected")
                })
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            let Some(file_stem) = bundle_stem(file_name) else {
                continue;
            };
            let (stem, _) = split_bundle_stem(file_stem);

            let relative_dir = entry
                .path()
                .parent()
                .and_then(|p| p.strip_prefix(&self.root).ok())
                .map(|p| {
                    p.components()
                        .map(|c| c.as_os_str().to_string_lossy().to_string())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            let mut segments = relative_dir;
            segments.push(stem.to_string());
            names.insert(segments.join("/"));
        }

        Ok(names.into_iter().collect())
    }
}

#[async_trait]
impl MessageAcceptor for FileSystemMessageStore {
    async fn set_messages(&self, base_name: &str, messages: Messages) -> Result<(), StoreError> {
        let (dir, stem) = resolve_base_name(&self.root, base_name)?;
        fs::create_dir_all(&dir).await?;

        let timestamp = now_iso();
        let header = [GENERATED_HEADER, timestamp.as_str()];
        let empty = LocaleMessages::new();

        // An empty catalog keeps an empty default file so the bundle stays known
        let locales = if messages.is_empty() {
            vec![None]
        } else {
            messages.locales()
        };

        for locale in &locales {
            let entries = messages.messages_for(*locale).unwrap_or(&empty);
            let path = dir.join(bundle_file_name(stem, *locale));
            write_atomic(&path, write_properties(entries, &header).as_bytes()).await?;
            debug!(path = %path.display(), entries = entries.len(), "Wrote bundle file");
        }

        // Remove files of locales that are no longer present
        for (path, locale) in self.bundle_files(&dir, stem).await? {
            if !locales.contains(&locale.as_ref()) {
                fs::remove_file(&path).await?;
                debug!(path = %path.display(), "Removed stale bundle file");
            }
        }

        Ok(())
    }

    async fn existing_messages(&self, base_name: &str) -> Result<Option<Messages>, StoreError> {
        if !self.root.is_dir() {
            return Ok(None);
        }
        self.get_messages(base_name).await
    }
}
