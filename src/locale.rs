//! Locale support for number formatting
//!
//! This module loads and manages locale-specific number symbols and patterns
//! and negotiates requested locale tags against the available set.
//! The default database is embedded as TOML and loaded once per process.

mod resolver;
mod tag;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::error::LocaleDataError;

pub use resolver::{ExtensionOptions, LocaleResolver, Locales, canonicalize_locale_list};
pub use tag::LanguageTag;

type Result<T> = std::result::Result<T, LocaleDataError>;

/// Locale tag used when nothing requested can be matched
pub const FALLBACK_LOCALE: &str = "en-US";

/// Number symbols and patterns for one locale
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleSettings {
    /// Decimal separator
    pub decimal_point: char,
    /// Grouping separator
    pub thousands_separator: char,
    /// Minus sign, possibly with bidi marks
    pub minus_sign: String,
    /// Percent sign
    pub percent_sign: String,
    /// Text shown for NaN
    pub nan_symbol: String,
    /// Text shown for infinities
    pub infinity_symbol: String,
    /// Percent pattern, `#` for the number and `%` for the sign
    pub percent_pattern: String,
    /// Currency pattern, `#` for the number and `¤` for the currency
    pub currency_pattern: String,
    /// Supported numbering systems, default first
    pub numbering_systems: Vec<String>,
    /// Locale-specific currency symbols overriding the shared table
    pub currency_symbols: HashMap<String, String>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            decimal_point: '.',
            thousands_separator: ',',
            minus_sign: "-".to_string(),
            percent_sign: "%".to_string(),
            nan_symbol: "NaN".to_string(),
            infinity_symbol: "∞".to_string(),
            percent_pattern: "#%".to_string(),
            currency_pattern: "¤#".to_string(),
            numbering_systems: vec!["latn".to_string()],
            currency_symbols: HashMap::new(),
        }
    }
}

impl LocaleSettings {
    /// Replace the decimal separator
    pub fn with_decimal_point(mut self, decimal_point: char) -> Self {
        self.decimal_point = decimal_point;
        self
    }

    /// Replace the grouping separator
    pub fn with_thousands_separator(mut self, separator: char) -> Self {
        self.thousands_separator = separator;
        self
    }

    /// Replace the currency pattern
    pub fn with_currency_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.currency_pattern = pattern.into();
        self
    }

    /// The numbering system used when none is requested
    pub fn default_numbering_system(&self) -> &str {
        self.numbering_systems
            .first()
            .map(String::as_str)
            .unwrap_or("latn")
    }

    /// Whether the locale supports the given numbering system
    pub fn supports_numbering_system(&self, numbering_system: &str) -> bool {
        self.numbering_systems.iter().any(|nu| nu == numbering_system)
    }
}

/// Display data for one currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// Symbol, e.g. `$`
    pub symbol: String,
    /// Display name, e.g. `US dollars`
    pub name: String,
}

/// A set of available locales with their number settings
#[derive(Debug, Clone)]
pub struct LocaleDatabase {
    default_locale: String,
    locales: BTreeMap<String, LocaleSettings>,
    currencies: HashMap<String, CurrencyInfo>,
}

// Global singleton for the embedded database
static LOCALE_DATABASE: OnceLock<Arc<LocaleDatabase>> = OnceLock::new();

impl LocaleDatabase {
    /// A database with no locales; every request falls back to the default
    pub fn empty() -> Self {
        Self {
            default_locale: FALLBACK_LOCALE.to_string(),
            locales: BTreeMap::new(),
            currencies: HashMap::new(),
        }
    }

    /// The shared database built from the embedded TOML data
    pub fn global() -> Arc<Self> {
        LOCALE_DATABASE
            .get_or_init(|| {
                let data = include_str!("locale/locale_settings.toml");
                match Self::from_toml_str(data) {
                    Ok(database) => {
                        tracing::debug!(
                            locales = database.locales.len(),
                            "loaded embedded locale data"
                        );
                        Arc::new(database)
                    }
                    Err(e) => {
                        // Keep going with fallback-only behavior
                        tracing::error!(error = %e, "failed to load embedded locale data");
                        Arc::new(Self::empty())
                    }
                }
            })
            .clone()
    }

    /// Parse a locale database from TOML text
    ///
    /// The document has an optional `default_locale` string, an optional
    /// `[base]` table applied under every locale, a `[currencies]` table keyed
    /// by ISO code and a `[locales]` table keyed by locale tag.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let parsed_toml: toml::Value = toml::from_str(toml_str)?;
        let table = parsed_toml
            .as_table()
            .ok_or_else(|| LocaleDataError::Malformed("Root is not a table".to_string()))?;

        let mut database = Self::empty();

        if let Some(default_locale) = table.get("default_locale") {
            let tag = default_locale.as_str().ok_or_else(|| {
                LocaleDataError::Malformed("default_locale is not a string".to_string())
            })?;
            database.default_locale = canonical_key(tag)?;
        }

        // First load base settings if available
        let base_settings = match table.get("base") {
            Some(base) => {
                let mut settings = LocaleSettings::default();
                apply_locale_settings(&mut settings, base, "base")?;
                settings
            }
            None => LocaleSettings::default(),
        };

        if let Some(currencies) = table.get("currencies") {
            database.parse_currencies(currencies)?;
        }

        if let Some(locales) = table.get("locales") {
            let locales = locales
                .as_table()
                .ok_or_else(|| LocaleDataError::Malformed("locales is not a table".to_string()))?;

            for (locale_id, value) in locales {
                let mut settings = base_settings.clone();
                apply_locale_settings(&mut settings, value, locale_id)?;
                database.locales.insert(canonical_key(locale_id)?, settings);
            }
        }

        Ok(database)
    }

    fn parse_currencies(&mut self, value: &toml::Value) -> Result<()> {
        let table = value
            .as_table()
            .ok_or_else(|| LocaleDataError::Malformed("currencies is not a table".to_string()))?;

        for (code, entry) in table {
            let entry = entry.as_table().ok_or_else(|| {
                LocaleDataError::Malformed(format!("currencies.{code} is not a table"))
            })?;
            let field = |name: &str| {
                entry
                    .get(name)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        LocaleDataError::Malformed(format!(
                            "Missing or invalid {name} in currencies.{code}"
                        ))
                    })
            };
            let info = CurrencyInfo {
                symbol: field("symbol")?,
                name: field("name")?,
            };
            self.currencies.insert(code.to_ascii_uppercase(), info);
        }

        Ok(())
    }

    /// Replace the locale used when nothing requested matches
    pub fn with_default_locale(mut self, tag: &str) -> Result<Self> {
        self.default_locale = canonical_key(tag)?;
        Ok(self)
    }

    /// Add or replace the settings of one locale
    pub fn with_locale(mut self, tag: &str, settings: LocaleSettings) -> Result<Self> {
        self.locales.insert(canonical_key(tag)?, settings);
        Ok(self)
    }

    /// The locale used when nothing requested matches
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Settings of an available locale, by canonical tag
    pub fn settings(&self, locale: &str) -> Option<&LocaleSettings> {
        self.locales.get(locale)
    }

    /// Settings of a locale, or defaults when it is not available
    pub fn settings_or_default(&self, locale: &str) -> LocaleSettings {
        self.settings(locale).cloned().unwrap_or_default()
    }

    /// Display data for a currency code
    pub fn currency(&self, code: &str) -> Option<&CurrencyInfo> {
        self.currencies.get(code)
    }

    /// All available locale tags in lexicographic order
    pub fn available_locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Whether a canonical tag is available as-is
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }
}

fn canonical_key(tag: &str) -> Result<String> {
    LanguageTag::parse(tag)
        .map(|t| t.base_name())
        .map_err(|_| LocaleDataError::Malformed(format!("Invalid locale tag {tag}")))
}

fn first_char(value: &toml::Value, key: &str, locale_id: &str) -> Result<Option<char>> {
    match value.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| {
                LocaleDataError::Malformed(format!("Invalid {key} in {locale_id}"))
            }),
    }
}

fn string_field(value: &toml::Value, key: &str, locale_id: &str) -> Result<Option<String>> {
    match value.get(key) {
        None => Ok(None),
        Some(v) => v.as_str().map(|s| Some(s.to_string())).ok_or_else(|| {
            LocaleDataError::Malformed(format!("Invalid {key} in {locale_id}"))
        }),
    }
}

/// Apply the fields present in a TOML locale table over existing settings
fn apply_locale_settings(
    settings: &mut LocaleSettings,
    value: &toml::Value,
    locale_id: &str,
) -> Result<()> {
    if !value.is_table() {
        return Err(LocaleDataError::Malformed(format!(
            "Locale setting {locale_id} is not a table"
        )));
    }

    if let Some(c) = first_char(value, "decimal", locale_id)? {
        settings.decimal_point = c;
    }
    if let Some(c) = first_char(value, "group", locale_id)? {
        settings.thousands_separator = c;
    }
    if let Some(s) = string_field(value, "minus", locale_id)? {
        settings.minus_sign = s;
    }
    if let Some(s) = string_field(value, "percent", locale_id)? {
        settings.percent_sign = s;
    }
    if let Some(s) = string_field(value, "nan", locale_id)? {
        settings.nan_symbol = s;
    }
    if let Some(s) = string_field(value, "infinity", locale_id)? {
        settings.infinity_symbol = s;
    }
    if let Some(s) = string_field(value, "percent_pattern", locale_id)? {
        settings.percent_pattern = s;
    }
    if let Some(s) = string_field(value, "currency_pattern", locale_id)? {
        settings.currency_pattern = s;
    }

    if let Some(systems) = value.get("numbering_systems") {
        let systems = systems
            .as_array()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                LocaleDataError::Malformed(format!("Invalid numbering_systems in {locale_id}"))
            })?;
        settings.numbering_systems = systems
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    LocaleDataError::Malformed(format!(
                        "Invalid numbering system in {locale_id}"
                    ))
                })
            })
            .collect::<Result<_>>()?;
    }

    if let Some(symbols) = value.get("currency_symbols") {
        let symbols = symbols.as_table().ok_or_else(|| {
            LocaleDataError::Malformed(format!("Invalid currency_symbols in {locale_id}"))
        })?;
        for (code, symbol) in symbols {
            let symbol = symbol.as_str().ok_or_else(|| {
                LocaleDataError::Malformed(format!("Invalid currency symbol {code} in {locale_id}"))
            })?;
            settings
                .currency_symbols
                .insert(code.to_ascii_uppercase(), symbol.to_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_loading() {
        let database = LocaleDatabase::global();
        assert!(
            database.available_locales().count() > 0,
            "Should have loaded some locales"
        );
        assert_eq!(database.default_locale(), "en-US");

        let en_us = database.settings("en-US").expect("Should have en-US locale");
        assert_eq!(en_us.decimal_point, '.');
        assert_eq!(en_us.thousands_separator, ',');

        let de = database.settings("de-DE").expect("Should have de-DE locale");
        assert_eq!(de.decimal_point, ',');
        assert_eq!(de.thousands_separator, '.');
        assert_eq!(de.currency_pattern, "#\u{a0}¤");
    }

    #[test]
    fn test_base_settings_inherited() {
        let database = LocaleDatabase::global();
        let ar = database.settings("ar-EG").unwrap();
        assert_eq!(ar.infinity_symbol, "∞");
        assert_eq!(ar.default_numbering_system(), "arab");
        assert!(ar.supports_numbering_system("latn"));
    }

    #[test]
    fn test_currency_table() {
        let database = LocaleDatabase::global();
        assert_eq!(database.currency("EUR").unwrap().symbol, "€");
        assert!(database.currency("XYZ").is_none());
        let en_ca = database.settings("en-CA").unwrap();
        assert_eq!(en_ca.currency_symbols.get("USD").map(String::as_str), Some("US$"));
    }

    #[test]
    fn test_custom_database() {
        let database = LocaleDatabase::from_toml_str(
            r#"
            default_locale = "pt_br"
            [base]
            decimal = ","
            [locales.pt-BR]
            group = "."
            "#,
        )
        .unwrap();
        assert_eq!(database.default_locale(), "pt-BR");
        let pt = database.settings("pt-BR").unwrap();
        assert_eq!(pt.decimal_point, ',');
        assert_eq!(pt.thousands_separator, '.');
    }

    #[test]
    fn test_malformed_database() {
        assert!(matches!(
            LocaleDatabase::from_toml_str("locales = 3"),
            Err(LocaleDataError::Malformed(_))
        ));
        assert!(matches!(
            LocaleDatabase::from_toml_str("[locales.en]\ndecimal = 1"),
            Err(LocaleDataError::Malformed(_))
        ));
        assert!(matches!(
            LocaleDatabase::from_toml_str("not toml ="),
            Err(LocaleDataError::Toml(_))
        ));
    }
}
