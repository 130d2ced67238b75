//! Mapping between bundle file names and (base name, locale) pairs.
//!
//! Files follow `<basename>[_<locale>].properties`; a bare base name holds
//! the default catalog.

use crate::messages::Locale;
use crate::store::StoreError;
use crate::utils::PROPERTIES_EXTENSION;
use std::path::{Path, PathBuf};

/// Parse a locale suffix, accepting only its canonical spelling.
///
/// `de_de` would otherwise alias `de_DE` and leave two files for one locale.
fn parse_canonical_locale(suffix: &str) -> Option<Locale> {
    Locale::parse(suffix)
        .ok()
        .filter(|locale| locale.to_string() == suffix)
}

/// Strip the `.properties` extension from a file name.
pub fn bundle_stem(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(PROPERTIES_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .filter(|s| !s.is_empty())
}

/// File name holding `locale` for the bundle whose last path segment is `stem`.
pub fn bundle_file_name(stem: &str, locale: Option<&Locale>) -> String {
    match locale {
        Some(locale) => format!("{}_{}.{}", stem, locale, PROPERTIES_EXTENSION),
        None => format!("{}.{}", stem, PROPERTIES_EXTENSION),
    }
}

/// If `file_name` belongs to the bundle `stem`, return the locale it holds.
pub fn match_bundle_file(file_name: &str, stem: &str) -> Option<Option<Locale>> {
    let file_stem = bundle_stem(file_name)?;

    if file_stem == stem {
        return Some(None);
    }

    file_stem
        .strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(parse_canonical_locale)
        .map(Some)
}

/// Split a file stem into its base name and locale.
///
/// The longest trailing locale suffix wins, as long as a non-empty base
/// name remains.
pub fn split_bundle_stem(file_stem: &str) -> (&str, Option<Locale>) {
    for (index, _) in file_stem.match_indices('_') {
        if index == 0 {
            continue;
        }
        if let Some(locale) = parse_canonical_locale(&file_stem[index + 1..]) {
            return (&file_stem[..index], Some(locale));
        }
    }

    (file_stem, None)
}

/// Resolve a base name to the directory holding its files and its file stem.
///
/// Base names may address subdirectories with `/`. Absolute paths, empty
/// segments and `.`/`..` segments are rejected, as is a last segment ending
/// in a locale suffix: `app_ui` would be read back as `app` in locale `ui`.
pub fn resolve_base_name<'a>(
    root: &Path,
    base_name: &'a str,
) -> Result<(PathBuf, &'a str), StoreError> {
    let invalid = || StoreError::InvalidBaseName(base_name.to_string());

    if base_name.is_empty() || base_name.contains('\\') {
        return Err(invalid());
    }

    let segments: Vec<&str> = base_name.split('/').collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || *s == "." || *s == "..")
    {
        return Err(invalid());
    }

    let (stem, dirs) = segments.split_last().ok_or_else(invalid)?;
    if split_bundle_stem(stem).1.is_some() {
        return Err(invalid());
    }
    let dir = dirs.iter().fold(root.to_path_buf(), |path, d| path.join(d));

    Ok((dir, *stem))
}
