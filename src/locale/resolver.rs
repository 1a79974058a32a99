//! Locale negotiation
//!
//! [`LocaleResolver`] is the contract the number format calls during
//! construction. [`LocaleDatabase`] implements it with RFC 4647 lookup over
//! its available locales.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{LanguageTag, LocaleDatabase};
use crate::error::Result;
use crate::types::{LocaleMatcher, NegotiatedLocale};

/// Extension keywords requested through options, keyed by `-u-` key
pub type ExtensionOptions = BTreeMap<String, String>;

/// Extension keys a number format cares about
const RELEVANT_EXTENSION_KEYS: &[&str] = &["nu"];

/// Requested locales: nothing, one tag, or a preference-ordered list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locales(Vec<String>);

impl Locales {
    /// No preference; the resolver's default locale is used
    pub fn none() -> Self {
        Self::default()
    }

    /// Requested tags in preference order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Locales {
    fn from(tag: &str) -> Self {
        Self(vec![tag.to_string()])
    }
}

impl From<String> for Locales {
    fn from(tag: String) -> Self {
        Self(vec![tag])
    }
}

impl From<Vec<String>> for Locales {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

impl From<&[&str]> for Locales {
    fn from(tags: &[&str]) -> Self {
        Self(tags.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Locales {
    fn from(tags: [&str; N]) -> Self {
        Self(tags.iter().map(|t| t.to_string()).collect())
    }
}

impl<T: Into<Locales>> From<Option<T>> for Locales {
    fn from(tags: Option<T>) -> Self {
        tags.map(Into::into).unwrap_or_default()
    }
}

/// Negotiates requested locales against an available set
///
/// Implementations must be deterministic and must not fail merely because
/// nothing matches; they fall back to a default locale instead.
pub trait LocaleResolver {
    /// Pick one locale for the request
    fn resolve(
        &self,
        requested: &Locales,
        extensions: &ExtensionOptions,
        matcher: LocaleMatcher,
    ) -> Result<NegotiatedLocale>;

    /// The requested locales that have a match, in request order
    fn supported_locales_of(
        &self,
        requested: &Locales,
        matcher: LocaleMatcher,
    ) -> Result<Vec<String>>;
}

impl<R: LocaleResolver + ?Sized> LocaleResolver for Arc<R> {
    fn resolve(
        &self,
        requested: &Locales,
        extensions: &ExtensionOptions,
        matcher: LocaleMatcher,
    ) -> Result<NegotiatedLocale> {
        (**self).resolve(requested, extensions, matcher)
    }

    fn supported_locales_of(
        &self,
        requested: &Locales,
        matcher: LocaleMatcher,
    ) -> Result<Vec<String>> {
        (**self).supported_locales_of(requested, matcher)
    }
}

/// Canonicalize every requested tag, dropping duplicates after the first
pub fn canonicalize_locale_list(requested: &Locales) -> Result<Vec<LanguageTag>> {
    let mut seen: Vec<String> = Vec::new();
    let mut tags = Vec::new();
    for tag in requested.as_slice() {
        let parsed = LanguageTag::parse(tag)?;
        let canonical = parsed.to_string();
        if !seen.contains(&canonical) {
            seen.push(canonical);
            tags.push(parsed);
        }
    }
    Ok(tags)
}

impl LocaleDatabase {
    /// Find the available locale matching a canonical base tag
    pub fn best_available_locale(&self, base_name: &str, matcher: LocaleMatcher) -> Option<String> {
        let mut candidate = base_name.to_string();
        loop {
            if self.contains(&candidate) {
                return Some(candidate);
            }
            let Some(pos) = candidate.rfind('-') else {
                break;
            };
            candidate.truncate(pos);
            // Never leave a dangling singleton behind
            if let Some(pos) = candidate.rfind('-') {
                if candidate.len() - pos == 2 {
                    candidate.truncate(pos);
                }
            }
        }

        match matcher {
            LocaleMatcher::Lookup => None,
            LocaleMatcher::BestFit => {
                let language = base_name.split('-').next().unwrap_or(base_name);
                self.available_locales()
                    .find(|available| available.split('-').next() == Some(language))
                    .map(str::to_string)
            }
        }
    }
}

impl LocaleResolver for LocaleDatabase {
    fn resolve(
        &self,
        requested: &Locales,
        extensions: &ExtensionOptions,
        matcher: LocaleMatcher,
    ) -> Result<NegotiatedLocale> {
        let tags = canonicalize_locale_list(requested)?;

        let matched = tags.iter().find_map(|tag| {
            self.best_available_locale(&tag.base_name(), matcher)
                .map(|locale| (locale, Some(tag)))
        });
        let (locale, tag) = matched.unwrap_or_else(|| {
            tracing::debug!(
                requested = ?requested.as_slice(),
                fallback = self.default_locale(),
                "no requested locale available, using default"
            );
            (self.default_locale().to_string(), None)
        });

        let settings = self.settings_or_default(&locale);
        let mut extension = String::new();
        let mut numbering_system = None;

        for key in RELEVANT_EXTENSION_KEYS {
            let tag_value = tag.and_then(|t| t.keyword(key));
            let from_tag = tag_value.as_deref();
            let from_options = extensions.get(*key).map(String::as_str);
            let Some(value) = from_options.or(from_tag) else {
                continue;
            };

            if *key == "nu" && settings.supports_numbering_system(value) {
                numbering_system = Some(value.to_string());
                // The keyword stays on the tag only when options did not override it
                if from_tag == Some(value) {
                    extension.push_str(&format!("-{key}-{value}"));
                }
            }
        }

        if !extension.is_empty() {
            extension.insert_str(0, "-u");
        }

        let numbering_system =
            numbering_system.or_else(|| Some(settings.default_numbering_system().to_string()));

        Ok(NegotiatedLocale {
            locale,
            extension,
            numbering_system,
        })
    }

    fn supported_locales_of(
        &self,
        requested: &Locales,
        matcher: LocaleMatcher,
    ) -> Result<Vec<String>> {
        let tags = canonicalize_locale_list(requested)?;
        let mut supported: Vec<String> = Vec::new();
        for tag in tags {
            let base_name = tag.base_name();
            if self.best_available_locale(&base_name, matcher).is_some()
                && !supported.contains(&base_name)
            {
                supported.push(base_name);
            }
        }
        Ok(supported)
    }
}
