use super::{MessageAcceptor, MessageProvider, StoreError};
use crate::messages::Messages;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Catalogs held in memory, keyed by base name.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    catalogs: RwLock<HashMap<String, Messages>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with one catalog.
    pub fn with_messages(base_name: impl Into<String>, messages: Messages) -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert(base_name.into(), messages);
        Self {
            catalogs: RwLock::new(catalogs),
        }
    }
}

#[async_trait]
impl MessageProvider for InMemoryMessageStore {
    async fn get_messages(&self, base_name: &str) -> Result<Option<Messages>, StoreError> {
        Ok(self.catalogs.read().await.get(base_name).cloned())
    }

    async fn available_base_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.catalogs.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl MessageAcceptor for InMemoryMessageStore {
    async fn set_messages(&self, base_name: &str, messages: Messages) -> Result<(), StoreError> {
        self.catalogs
            .write()
            .await
            .insert(base_name.to_string(), messages);
        Ok(())
    }

    async fn existing_messages(&self, base_name: &str) -> Result<Option<Messages>, StoreError> {
        self.get_messages(base_name).await
    }
}
