#![allow(dead_code)]

use messagesource::{Locale, Messages};
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for a test
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Should create temp dir")
}

pub fn german() -> Locale {
    Locale::parse("de").expect("Should parse locale")
}

/// Catalog with German "key" -> "value"
pub fn german_messages() -> Messages {
    let mut messages = Messages::new();
    messages.add_message(Some(&german()), "key", "value");
    messages
}

/// Write a bundle file relative to `dir`, creating parent directories
pub fn write_bundle(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Should create bundle dir");
    }
    std::fs::write(path, content).expect("Should write bundle file");
}
