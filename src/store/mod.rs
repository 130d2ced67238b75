//! Read and write capabilities for message catalogs.
//!
//! Storage backends implement [`MessageProvider`] to hand out catalogs and
//! [`MessageAcceptor`] to receive them. A backend that does both is a
//! [`MessageStore`].

mod json;
mod memory;

pub use json::{JsonMessageStore, DEFAULT_LOCALE_KEY};
pub use memory::InMemoryMessageStore;

use crate::messages::{LocaleError, Messages};
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse {} at line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid base name: {0:?}")]
    InvalidBaseName(String),

    #[error("Locale error: {0}")]
    InvalidLocale(#[from] LocaleError),
}

/// Read access to message catalogs.
#[async_trait]
pub trait MessageProvider: Send + Sync {
    /// Return a copy of the catalog stored for `base_name`.
    ///
    /// An unknown base name yields `Ok(None)`. Errors are reserved for
    /// storage that cannot be read.
    async fn get_messages(&self, base_name: &str) -> Result<Option<Messages>, StoreError>;

    /// Every base name this provider holds a catalog for.
    async fn available_base_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Write access to message catalogs.
#[async_trait]
pub trait MessageAcceptor: Send + Sync {
    /// Replace whatever is stored for `base_name` with `messages`.
    async fn set_messages(&self, base_name: &str, messages: Messages) -> Result<(), StoreError>;

    /// The catalog currently stored for `base_name`.
    ///
    /// Write-only acceptors keep the default, which reports nothing stored.
    async fn existing_messages(&self, _base_name: &str) -> Result<Option<Messages>, StoreError> {
        Ok(None)
    }
}

impl StoreError {
    /// Whether the storage was reachable but held content that does not parse
    pub fn is_malformed_content(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::InvalidLocale(_))
    }
}

/// A backend that can both provide and accept catalogs.
pub trait MessageStore: MessageProvider + MessageAcceptor {}

impl<T: MessageProvider + MessageAcceptor + ?Sized> MessageStore for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::FileSystemMessageStore;

    fn assert_store<S: MessageStore + ?Sized>(_: &S) {}

    #[test]
    fn test_dual_role_backends_are_stores() {
        assert_store(&InMemoryMessageStore::new());
        assert_store(&JsonMessageStore::new("messages.json"));
        assert_store(&FileSystemMessageStore::new("i18n"));
    }

    struct WriteOnly;

    #[async_trait]
    impl MessageAcceptor for WriteOnly {
        async fn set_messages(&self, _base_name: &str, _messages: Messages) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_write_only_acceptor_reports_nothing_stored() {
        let acceptor = WriteOnly;
        acceptor.set_messages("app", Messages::new()).await.unwrap();
        assert_eq!(acceptor.existing_messages("app").await.unwrap(), None);
    }

    #[test]
    fn test_is_malformed_content() {
        let parse = StoreError::Parse {
            path: PathBuf::from("app.properties"),
            line: 1,
            message: "bad".to_string(),
        };
        assert!(parse.is_malformed_content());
        assert_eq!(
            parse.to_string(),
            "Failed to parse app.properties at line 1: bad"
        );
        let locale = StoreError::InvalidLocale(LocaleError::Invalid("x".to_string()));
        assert!(locale.is_malformed_content());

        let io = StoreError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "down"));
        assert!(!io.is_malformed_content());
        assert!(!StoreError::InvalidBaseName("a_de".to_string()).is_malformed_content());
    }
}
