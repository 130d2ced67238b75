mod hash;

pub use hash::compute_hash;

use std::path::Path;
use tokio::fs;
use uuid::Uuid;

/// Extension of message bundle files
pub const PROPERTIES_EXTENSION: &str = "properties";

/// Get current timestamp in ISO 8601 format
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Write a file atomically using temp file + rename.
///
/// Missing parent directories are created. The temp file lives next to the
/// destination so the rename never crosses a filesystem boundary.
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    fs::write(&temp_path, content).await?;
    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    Ok(())
}
