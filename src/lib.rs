pub mod config;
pub mod filesystem;
pub mod messages;
pub mod reconciliation;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::{read_config, ConfigError, ImportConfig, StoreLocation};
pub use filesystem::FileSystemMessageStore;
pub use messages::{Locale, LocaleError, Messages};
pub use reconciliation::{
    ChangeKind, ImportError, ImportPlan, ImportResult, ImportStatus, Importer, MessageChange,
};
pub use store::{
    InMemoryMessageStore, JsonMessageStore, MessageAcceptor, MessageProvider, MessageStore,
    StoreError,
};
