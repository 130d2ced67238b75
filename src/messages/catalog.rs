use super::locale::Locale;
use crate::utils::compute_hash;
use std::collections::BTreeMap;

/// Key/value translations of a single locale
pub type LocaleMessages = BTreeMap<String, String>;

/// All translations for a single base name, organized by locale.
///
/// The `None` locale is the default catalog that applies when no
/// locale-specific translation exists. A locale is present exactly when it
/// holds at least one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    entries: BTreeMap<Option<Locale>, LocaleMessages>,
}

impl Messages {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value for (locale, key).
    pub fn add_message(
        &mut self,
        locale: Option<&Locale>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries
            .entry(locale.cloned())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Remove the (locale, key) entry, returning its value if it was present.
    pub fn remove_message(&mut self, locale: Option<&Locale>, key: &str) -> Option<String> {
        let locale = locale.cloned();
        let locale_messages = self.entries.get_mut(&locale)?;
        let removed = locale_messages.remove(key);

        if locale_messages.is_empty() {
            self.entries.remove(&locale);
        }

        removed
    }

    /// Look up the value for (locale, key).
    pub fn get_message(&self, locale: Option<&Locale>, key: &str) -> Option<&str> {
        self.entries
            .get(&locale.cloned())
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// Locales that currently hold at least one key, default locale first.
    pub fn locales(&self) -> Vec<Option<&Locale>> {
        self.entries.keys().map(Option::as_ref).collect()
    }

    /// All entries of one locale.
    pub fn messages_for(&self, locale: Option<&Locale>) -> Option<&LocaleMessages> {
        self.entries.get(&locale.cloned())
    }

    /// Insert every entry of `messages` under `locale`.
    pub fn extend_locale<I, K, V>(&mut self, locale: Option<&Locale>, messages: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in messages {
            self.add_message(locale, key, value);
        }
    }

    /// Number of (locale, key) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (locale, key, value) triples ordered by locale, then key.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&Locale>, &str, &str)> {
        self.entries.iter().flat_map(|(locale, messages)| {
            messages
                .iter()
                .map(move |(k, v)| (locale.as_ref(), k.as_str(), v.as_str()))
        })
    }

    /// SHA-256 digest of the catalog's ordered triples.
    ///
    /// Equal catalogs always share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut canonical = Vec::new();
        for (locale, key, value) in self.iter() {
            let locale = locale.map(|l| l.to_string()).unwrap_or_default();
            for field in [locale.as_str(), key, value] {
                canonical.extend_from_slice(&(field.len() as u64).to_le_bytes());
                canonical.extend_from_slice(field.as_bytes());
            }
        }
        compute_hash(&canonical)
    }
}
