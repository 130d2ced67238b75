//! The message catalog data model.
//!
//! A [`Messages`] value holds every translation of one base name, keyed by
//! locale and message key.

mod catalog;
mod locale;

pub use catalog::{LocaleMessages, Messages};
pub use locale::{Locale, LocaleError};
