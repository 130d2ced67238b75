//! Locale identifiers in the `language[_COUNTRY[_variant]]` form used by
//! property bundle file names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pattern for `language[_COUNTRY[_variant]]`, accepting `-` as separator too.
static LOCALE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:[_-]([A-Za-z]{2}|[0-9]{3})?(?:[_-]([A-Za-z0-9]+))?)?$")
        .expect("locale pattern should compile")
});

/// Error types for locale operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Invalid locale: {0}")]
    Invalid(String),
}

/// A language with optional country and variant.
///
/// Ordering is lexicographic over (language, country, variant), which keeps
/// `de` before `de_AT` before `de_DE`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locale {
    language: String,
    country: String,
    variant: String,
}

impl Locale {
    /// Create a locale for a bare language.
    pub fn new(language: &str) -> Result<Self, LocaleError> {
        Self::parse(language)
    }

    /// Create a locale for a language and country.
    pub fn with_country(language: &str, country: &str) -> Result<Self, LocaleError> {
        Self::parse(&format!("{}_{}", language, country))
    }

    /// Parse a locale string (e.g. "de", "de_DE", "de-DE", "de__POSIX").
    ///
    /// Language is normalized to lowercase and country to uppercase. The
    /// variant is kept as written.
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        let captures = LOCALE_PATTERN
            .captures(s)
            .ok_or_else(|| LocaleError::Invalid(s.to_string()))?;

        let language = captures
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        let country = captures
            .get(2)
            .map(|m| m.as_str().to_ascii_uppercase())
            .unwrap_or_default();
        let variant = captures
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        // "de_" matches the pattern with an empty country and no variant
        if country.is_empty() && variant.is_empty() && s.len() != language.len() {
            return Err(LocaleError::Invalid(s.to_string()));
        }

        Ok(Self {
            language,
            country,
            variant,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Country code, if any.
    pub fn country(&self) -> Option<&str> {
        Some(self.country.as_str()).filter(|c| !c.is_empty())
    }

    /// Variant, if any.
    pub fn variant(&self) -> Option<&str> {
        Some(self.variant.as_str()).filter(|v| !v.is_empty())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if !self.country.is_empty() || !self.variant.is_empty() {
            write!(f, "_{}", self.country)?;
        }
        if !self.variant.is_empty() {
            write!(f, "_{}", self.variant)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("de").unwrap();
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.country(), None);
        assert_eq!(locale.variant(), None);
    }

    #[test]
    fn test_parse_language_and_country() {
        let locale = Locale::parse("en_US").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.country(), Some("US"));
    }

    #[test]
    fn test_parse_normalizes_case_and_separator() {
        let locale = Locale::parse("PT-br").unwrap();
        assert_eq!(locale.to_string(), "pt_BR");
    }

    #[test]
    fn test_parse_numeric_region() {
        let locale = Locale::parse("es_419").unwrap();
        assert_eq!(locale.country(), Some("419"));
    }

    #[test]
    fn test_parse_variant_without_country() {
        let locale = Locale::parse("de__POSIX").unwrap();
        assert_eq!(locale.country(), None);
        assert_eq!(locale.variant(), Some("POSIX"));
        assert_eq!(locale.to_string(), "de__POSIX");
    }

    #[test]
    fn test_parse_full() {
        let locale = Locale::parse("de_DE_POSIX").unwrap();
        assert_eq!(locale.to_string(), "de_DE_POSIX");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("d").is_err());
        assert!(Locale::parse("german").is_err());
        assert!(Locale::parse("de_").is_err());
        assert!(Locale::parse("de_POSIX").is_err());
        assert!(Locale::parse("de_DE_").is_err());
        assert!(Locale::parse("12").is_err());
    }

    #[test]
    fn test_with_country() {
        let locale = Locale::with_country("fr", "ca").unwrap();
        assert_eq!(locale.to_string(), "fr_CA");
    }

    #[test]
    fn test_ordering() {
        let mut locales = vec![
            Locale::parse("de_DE").unwrap(),
            Locale::parse("en").unwrap(),
            Locale::parse("de").unwrap(),
            Locale::parse("de_AT").unwrap(),
        ];
        locales.sort();

        let rendered: Vec<String> = locales.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["de", "de_AT", "de_DE", "en"]);
    }
}
