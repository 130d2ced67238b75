use super::plan::ImportPlan;
use crate::filesystem::FileSystemMessageStore;
use crate::messages::Messages;
use crate::store::{MessageAcceptor, MessageProvider, StoreError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read messages for {base_name}: {source}")]
    Read {
        base_name: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to list base names: {source}")]
    List {
        #[source]
        source: StoreError,
    },

    #[error("Failed to write messages for {base_name}: {source}")]
    Write {
        base_name: String,
        #[source]
        source: StoreError,
    },
}

impl ImportError {
    fn read(base_name: &str) -> impl FnOnce(StoreError) -> Self + '_ {
        move |source| Self::Read {
            base_name: base_name.to_string(),
            source,
        }
    }

    fn write(base_name: &str) -> impl FnOnce(StoreError) -> Self + '_ {
        move |source| Self::Write {
            base_name: base_name.to_string(),
            source,
        }
    }
}

/// Outcome of importing one base name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// The target now holds the source catalog
    Imported,
    /// The target already held an equal catalog, nothing was written
    Unchanged,
    /// The provider has no catalog for the base name, the target is untouched
    NotFound,
}

/// Result of importing one base name
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub base_name: String,
    pub status: ImportStatus,
    /// Changes between the previous target catalog and the source
    pub plan: ImportPlan,
    /// Fingerprint of the imported source catalog, if one was found
    pub fingerprint: Option<String>,
}

/// Copies catalogs from a provider into an acceptor.
///
/// Each import replaces the acceptor's whole catalog for one base name, so
/// entries removed from the source disappear from the target.
pub struct Importer {
    provider: Arc<dyn MessageProvider>,
    acceptor: Arc<dyn MessageAcceptor>,
}

impl Importer {
    pub fn new(provider: Arc<dyn MessageProvider>, acceptor: Arc<dyn MessageAcceptor>) -> Self {
        Self { provider, acceptor }
    }

    /// Import from a directory of `.properties` bundles.
    pub fn from_directory(dir: impl Into<PathBuf>, acceptor: Arc<dyn MessageAcceptor>) -> Self {
        Self::new(Arc::new(FileSystemMessageStore::new(dir)), acceptor)
    }

    /// Fetch the source catalog and diff it against the target.
    ///
    /// Returns `None` when the provider does not know the base name.
    async fn prepare(
        &self,
        base_name: &str,
    ) -> Result<Option<(Messages, Option<Messages>, ImportPlan)>, ImportError> {
        let Some(source) = self
            .provider
            .get_messages(base_name)
            .await
            .map_err(ImportError::read(base_name))?
        else {
            return Ok(None);
        };

        // A target that no longer parses is overwritten like an empty one
        let existing = match self.acceptor.existing_messages(base_name).await {
            Ok(existing) => existing,
            Err(e) if e.is_malformed_content() => None,
            Err(e) => return Err(ImportError::read(base_name)(e)),
        };

        let plan = match &existing {
            Some(existing) => ImportPlan::between(existing, &source),
            None => ImportPlan::between(&Messages::new(), &source),
        };

        Ok(Some((source, existing, plan)))
    }

    /// Compute what importing `base_name` would change, without writing.
    pub async fn plan_import(&self, base_name: &str) -> Result<Option<ImportPlan>, ImportError> {
        Ok(self.prepare(base_name).await?.map(|(_, _, plan)| plan))
    }

    /// Make the acceptor's catalog for `base_name` equal the provider's.
    ///
    /// An unknown base name is not an error and leaves the acceptor as is.
    /// The source is read before anything is written, so a read failure
    /// never leaves the target partially modified. A target catalog that
    /// exists but does not parse is treated as absent and replaced.
    pub async fn import_messages(&self, base_name: &str) -> Result<ImportResult, ImportError> {
        let Some((source, existing, plan)) = self.prepare(base_name).await? else {
            return Ok(ImportResult {
                base_name: base_name.to_string(),
                status: ImportStatus::NotFound,
                plan: ImportPlan::default(),
                fingerprint: None,
            });
        };

        let fingerprint = source.fingerprint();

        let status = if existing.is_some() && plan.is_empty() {
            ImportStatus::Unchanged
        } else {
            self.acceptor
                .set_messages(base_name, source)
                .await
                .map_err(ImportError::write(base_name))?;
            ImportStatus::Imported
        };

        Ok(ImportResult {
            base_name: base_name.to_string(),
            status,
            plan,
            fingerprint: Some(fingerprint),
        })
    }

    /// Import every base name the provider knows, stopping at the first error.
    pub async fn import_all(&self) -> Result<Vec<ImportResult>, ImportError> {
        let base_names = self
            .provider
            .available_base_names()
            .await
            .map_err(|source| ImportError::List { source })?;

        let mut results = Vec::with_capacity(base_names.len());
        for base_name in &base_names {
            results.push(self.import_messages(base_name).await?);
        }

        Ok(results)
    }
}
