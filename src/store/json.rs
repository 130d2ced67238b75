use super::{MessageAcceptor, MessageProvider, StoreError};
use crate::messages::{Locale, LocaleMessages, Messages};
use crate::utils::{now_iso, write_atomic};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Key under which the default (no locale) catalog is stored
pub const DEFAULT_LOCALE_KEY: &str = "default";

/// Locale key -> message key -> value
type StoredBundle = BTreeMap<String, LocaleMessages>;

/// On-disk layout of a JSON message store
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    /// Schema version for future migrations
    pub schema_version: u32,

    /// When the document was last written
    pub updated_at: String,

    /// Map of base name -> stored bundle
    #[serde(default)]
    pub bundles: BTreeMap<String, StoredBundle>,
}

impl StoreDocument {
    pub fn new() -> Self {
        Self {
            schema_version: 1,
            updated_at: now_iso(),
            bundles: BTreeMap::new(),
        }
    }
}

/// All catalogs kept in a single JSON document.
///
/// Writes are read-modify-write cycles serialized by a per-store lock and
/// land atomically, so other base names in the same file are preserved.
#[derive(Debug)]
pub struct JsonMessageStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonMessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document from disk, or an empty one if the file is missing
    async fn read_document(&self) -> Result<StoreDocument, StoreError> {
        if !self.path.exists() {
            return Ok(StoreDocument::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        let document: StoreDocument = serde_json::from_str(&content)?;
        Ok(document)
    }

    /// Write the document to disk (caller must hold the lock)
    async fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document)?;
        write_atomic(&self.path, content.as_bytes()).await?;
        Ok(())
    }
}

fn bundle_to_messages(bundle: &StoredBundle) -> Result<Messages, StoreError> {
    let mut messages = Messages::new();
    for (locale_key, entries) in bundle {
        let locale = if locale_key == DEFAULT_LOCALE_KEY {
            None
        } else {
            Some(Locale::parse(locale_key)?)
        };
        messages.extend_locale(locale.as_ref(), entries.clone());
    }
    Ok(messages)
}

fn messages_to_bundle(messages: &Messages) -> StoredBundle {
    messages
        .locales()
        .into_iter()
        .filter_map(|locale| {
            let key = locale
                .map(|l| l.to_string())
                .unwrap_or_else(|| DEFAULT_LOCALE_KEY.to_string());
            messages.messages_for(locale).map(|m| (key, m.clone()))
        })
        .collect()
}

#[async_trait]
impl MessageProvider for JsonMessageStore {
    async fn get_messages(&self, base_name: &str) -> Result<Option<Messages>, StoreError> {
        let document = self.read_document().await?;
        document
            .bundles
            .get(base_name)
            .map(bundle_to_messages)
            .transpose()
    }

    async fn available_base_names(&self) -> Result<Vec<String>, StoreError> {
        let document = self.read_document().await?;
        Ok(document.bundles.keys().cloned().collect())
    }
}

#[async_trait]
impl MessageAcceptor for JsonMessageStore {
    async fn set_messages(&self, base_name: &str, messages: Messages) -> Result<(), StoreError> {
        // Lock the entire read-modify-write cycle
        let _guard = self.lock.lock().await;

        let mut document = self.read_document().await?;
        document
            .bundles
            .insert(base_name.to_string(), messages_to_bundle(&messages));
        document.updated_at = now_iso();

        self.write_document(&document).await?;

        debug!(
            path = %self.path.display(),
            base_name,
            entries = messages.len(),
            "Stored catalog"
        );
        Ok(())
    }

    async fn existing_messages(&self, base_name: &str) -> Result<Option<Messages>, StoreError> {
        self.get_messages(base_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_conversion_keeps_default_locale() {
        let german = Locale::parse("de_DE").unwrap();
        let mut messages = Messages::new();
        messages.add_message(None, "key", "default");
        messages.add_message(Some(&german), "key", "deutsch");

        let bundle = messages_to_bundle(&messages);
        assert!(bundle.contains_key(DEFAULT_LOCALE_KEY));
        assert!(bundle.contains_key("de_DE"));

        assert_eq!(bundle_to_messages(&bundle).unwrap(), messages);
    }

    #[test]
    fn test_invalid_locale_key_is_rejected() {
        let mut bundle = StoredBundle::new();
        bundle.insert("not a locale".to_string(), LocaleMessages::new());

        assert!(matches!(
            bundle_to_messages(&bundle),
            Err(StoreError::InvalidLocale(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonMessageStore::new(temp_dir.path().join("messages.json"));

        assert!(store.available_base_names().await.unwrap().is_empty());
        assert_eq!(store.get_messages("app").await.unwrap(), None);
    }
}
