//! Table-driven engine backed by the locale database

use std::sync::Arc;

use thiserror::Error;

use super::digits::{DecimalDigits, digit_table, group_digits};
use super::parse::{ParseSymbols, parse_localized};
use super::{Engine, EngineResolved};
use crate::locale::{LanguageTag, LocaleDatabase, LocaleSettings};
use crate::types::{CurrencyConfig, CurrencyDisplay, StyleConfig, ValidatedOptions};

const LATIN_DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Errors raised by [`StandardEngine`]
#[derive(Debug, Error)]
pub enum StandardEngineError {
    /// The locale tag handed to the engine is not well formed
    #[error("Unsupported locale tag: {0}")]
    InvalidLocale(String),
}

/// Engine formatting with the symbols and patterns of a [`LocaleDatabase`]
#[derive(Debug, Clone)]
pub struct StandardEngine {
    database: Arc<LocaleDatabase>,
}

impl Default for StandardEngine {
    fn default() -> Self {
        Self::new(LocaleDatabase::global())
    }
}

impl StandardEngine {
    /// Create an engine over a locale database
    pub fn new(database: Arc<LocaleDatabase>) -> Self {
        Self { database }
    }

    /// The database this engine reads symbols from
    pub fn database(&self) -> &Arc<LocaleDatabase> {
        &self.database
    }

    fn currency_text(&self, settings: &LocaleSettings, currency: &CurrencyConfig) -> String {
        let code = currency.code.as_str();
        let info = self.database.currency(code);
        match currency.display {
            CurrencyDisplay::Code => code.to_string(),
            CurrencyDisplay::Symbol => settings
                .currency_symbols
                .get(code)
                .cloned()
                .or_else(|| info.map(|i| i.symbol.clone()))
                .unwrap_or_else(|| code.to_string()),
            CurrencyDisplay::Name => info
                .map(|i| i.name.clone())
                .unwrap_or_else(|| code.to_string()),
        }
    }
}

/// Everything needed to format and parse for one formatter
#[derive(Debug, Clone)]
pub struct StandardHandle {
    settings: LocaleSettings,
    digits: [char; 10],
    config: ValidatedOptions,
    prefix: String,
    suffix: String,
    parse_symbols: ParseSymbols,
}

impl StandardHandle {
    /// Locale settings in use
    pub fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    fn render_number(&self, magnitude: f64) -> String {
        let digits = DecimalDigits::from_f64(magnitude);
        let (mut integer, fraction) = match self.config.significant_digits {
            Some(range) => digits.render_significant(range),
            None => digits.render_fraction(self.config.fraction_digits),
        };

        let minimum_integer = self.config.minimum_integer_digits as usize;
        if integer.len() < minimum_integer {
            integer.insert_str(0, &"0".repeat(minimum_integer - integer.len()));
        }
        if self.config.use_grouping {
            integer = group_digits(&integer, self.settings.thousands_separator);
        }

        let mut number = integer;
        if !fraction.is_empty() {
            number.push(self.settings.decimal_point);
            number.push_str(&fraction);
        }
        number
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if c.is_ascii_digit() => self.digits[d as usize],
                _ => c,
            })
            .collect()
    }
}

/// Split a pattern into the text before and after `#`, expanding symbols
fn expand_pattern(pattern: &str, currency: &str, percent: &str) -> (String, String) {
    let mut prefix = String::new();
    let mut suffix = String::new();
    let mut seen_number = false;
    for c in pattern.chars() {
        let target = if seen_number { &mut suffix } else { &mut prefix };
        match c {
            '#' => seen_number = true,
            '¤' => target.push_str(currency),
            '%' => target.push_str(percent),
            other => target.push(other),
        }
    }
    (prefix, suffix)
}

/// Separate an alphabetic currency label from the digits
fn apply_currency_spacing(pattern: &str) -> String {
    pattern.replace("¤#", "¤\u{a0}#").replace("#¤", "#\u{a0}¤")
}

impl Engine for StandardEngine {
    type Handle = StandardHandle;
    type Error = StandardEngineError;

    fn build(
        &self,
        locale_tag: &str,
        config: &ValidatedOptions,
        resolved: &mut EngineResolved,
    ) -> Result<StandardHandle, StandardEngineError> {
        let tag = LanguageTag::parse(locale_tag)
            .map_err(|_| StandardEngineError::InvalidLocale(locale_tag.to_string()))?;
        let locale = tag.base_name();
        let settings = self.database.settings_or_default(&locale);

        let usable =
            |nu: &str| settings.supports_numbering_system(nu) && digit_table(nu).is_some();
        let tag_nu = tag.keyword("nu");
        let from_tag = tag_nu.as_deref().filter(|nu| usable(*nu));
        let numbering_system = from_tag
            .or_else(|| Some(resolved.numbering_system.as_str()).filter(|nu| usable(*nu)))
            .or_else(|| Some(settings.default_numbering_system()).filter(|nu| usable(*nu)))
            .unwrap_or("latn")
            .to_string();
        let digits = digit_table(&numbering_system).unwrap_or(LATIN_DIGITS);

        resolved.locale = match from_tag {
            Some(nu) if nu == numbering_system => format!("{locale}-u-nu-{nu}"),
            _ => locale,
        };
        resolved.numbering_system = numbering_system;

        let (prefix, suffix) = match &config.style {
            StyleConfig::Decimal => (String::new(), String::new()),
            StyleConfig::Percent => {
                expand_pattern(&settings.percent_pattern, "", &settings.percent_sign)
            }
            StyleConfig::Currency(currency) => {
                let text = self.currency_text(&settings, currency);
                let pattern = match currency.display {
                    CurrencyDisplay::Symbol => settings.currency_pattern.clone(),
                    CurrencyDisplay::Code => apply_currency_spacing(&settings.currency_pattern),
                    CurrencyDisplay::Name => "# ¤".to_string(),
                };
                expand_pattern(&pattern, &text, &settings.percent_sign)
            }
        };

        let parse_symbols = ParseSymbols::new(&settings, &digits, &prefix, &suffix);
        tracing::trace!(
            locale = %resolved.locale,
            numbering_system = %resolved.numbering_system,
            "built standard engine handle"
        );

        Ok(StandardHandle {
            settings,
            digits,
            config: config.clone(),
            prefix,
            suffix,
            parse_symbols,
        })
    }

    fn format(&self, handle: &StandardHandle, value: f64) -> Result<String, StandardEngineError> {
        if value.is_nan() {
            return Ok(handle.settings.nan_symbol.clone());
        }

        let mut magnitude = value.abs();
        if matches!(handle.config.style, StyleConfig::Percent) {
            magnitude *= 100.0;
        }

        let number = if magnitude.is_infinite() {
            handle.settings.infinity_symbol.clone()
        } else {
            handle.render_number(magnitude)
        };

        let mut formatted = String::new();
        if value < 0.0 {
            formatted.push_str(&handle.settings.minus_sign);
        }
        formatted.push_str(&handle.prefix);
        formatted.push_str(&number);
        formatted.push_str(&handle.suffix);
        Ok(formatted)
    }

    fn parse(&self, handle: &StandardHandle, text: &str) -> Result<f64, StandardEngineError> {
        let value = parse_localized(text, &handle.parse_symbols);
        if matches!(handle.config.style, StyleConfig::Percent) {
            return Ok(value / 100.0);
        }
        Ok(value)
    }
}
