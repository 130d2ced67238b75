use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of a byte sequence as lowercase hex
pub fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
