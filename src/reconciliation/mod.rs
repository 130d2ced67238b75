mod execute;
mod plan;

pub use execute::{ImportError, ImportResult, ImportStatus, Importer};
pub use plan::{ChangeKind, ImportPlan, MessageChange};
