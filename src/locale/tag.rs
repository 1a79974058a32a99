//! Language tag canonicalization on top of `icu_locid`
//!
//! Only the structure is checked; whether a language or region exists is not.

use std::fmt;

use icu_locid::Locale;
use icu_locid::extensions::unicode::Key;

use crate::error::{NumberFormatError, Result};

/// A structurally valid, canonically cased language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    locale: Locale,
}

impl LanguageTag {
    /// Parse and canonicalize a tag; `_` is accepted as a separator
    ///
    /// # Examples
    /// ```
    /// use intl_number_format::locale::LanguageTag;
    ///
    /// let tag = LanguageTag::parse("zh_hant_tw-u-nu-hanidec").unwrap();
    /// assert_eq!(tag.base_name(), "zh-Hant-TW");
    /// assert_eq!(tag.keyword("nu").as_deref(), Some("hanidec"));
    /// ```
    pub fn parse(tag: &str) -> Result<Self> {
        let locale = tag
            .replace('_', "-")
            .parse::<Locale>()
            .map_err(|_| NumberFormatError::InvalidLanguageTag(tag.to_string()))?;
        Ok(Self { locale })
    }

    /// Canonical tag without extensions, e.g. `zh-Hant-TW`
    pub fn base_name(&self) -> String {
        self.locale.id.to_string()
    }

    /// Language subtag
    pub fn language(&self) -> &str {
        self.locale.id.language.as_str()
    }

    /// Value of a `-u-` keyword, e.g. `nu`; a keyword without a type reads as `true`
    pub fn keyword(&self, key: &str) -> Option<String> {
        let key = key.parse::<Key>().ok()?;
        let value = self.locale.extensions.unicode.keywords.get(&key)?.to_string();
        Some(if value.is_empty() {
            "true".to_string()
        } else {
            value
        })
    }
}

/// Base name plus the `-u-` extension; other extensions and private use are dropped
impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut canonical = Locale::from(self.locale.id.clone());
        canonical.extensions.unicode = self.locale.extensions.unicode.clone();
        write!(f, "{canonical}")
    }
}
