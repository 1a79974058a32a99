//! Type definitions for number format options
//!
//! This module defines the validated option model, the negotiated locale
//! descriptor and the resolved options snapshot exposed to callers.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// An option whose value is one keyword out of a fixed set
pub trait OptionKeyword: Copy + Sized + 'static {
    /// Every accepted value, in declaration order
    const ALL: &'static [Self];

    /// The keyword spelling of this value
    fn keyword(self) -> &'static str;

    /// Look a value up by its exact (case-sensitive) keyword
    fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.keyword() == keyword)
    }
}

/// Formatting style requested through the `style` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Plain number
    #[default]
    Decimal,
    /// Value scaled by 100 and shown with a percent sign
    Percent,
    /// Monetary amount in a currency
    Currency,
}

impl OptionKeyword for Style {
    const ALL: &'static [Self] = &[Style::Decimal, Style::Percent, Style::Currency];

    fn keyword(self) -> &'static str {
        match self {
            Style::Decimal => "decimal",
            Style::Percent => "percent",
            Style::Currency => "currency",
        }
    }
}

/// How a currency is labelled in formatted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyDisplay {
    /// ISO 4217 code, e.g. USD
    Code,
    /// Localized symbol, e.g. $
    #[default]
    Symbol,
    /// Localized name, e.g. US dollars
    Name,
}

impl OptionKeyword for CurrencyDisplay {
    const ALL: &'static [Self] = &[
        CurrencyDisplay::Code,
        CurrencyDisplay::Symbol,
        CurrencyDisplay::Name,
    ];

    fn keyword(self) -> &'static str {
        match self {
            CurrencyDisplay::Code => "code",
            CurrencyDisplay::Symbol => "symbol",
            CurrencyDisplay::Name => "name",
        }
    }
}

/// Locale matching algorithm requested through `localeMatcher`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleMatcher {
    /// RFC 4647 lookup
    Lookup,
    /// Lookup, then any available locale with the same language
    #[default]
    BestFit,
}

impl OptionKeyword for LocaleMatcher {
    const ALL: &'static [Self] = &[LocaleMatcher::Lookup, LocaleMatcher::BestFit];

    fn keyword(self) -> &'static str {
        match self {
            LocaleMatcher::Lookup => "lookup",
            LocaleMatcher::BestFit => "best fit",
        }
    }
}

/// A well-formed, upper-cased ISO 4217 currency code
///
/// Only the shape is checked: three ASCII letters. The code need not name a
/// real currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Check the ISO 4217 shape on the code exactly as supplied
    pub fn is_well_formed(code: &str) -> bool {
        code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Validate the shape first, then normalize to upper case
    pub fn parse(code: &str) -> Option<Self> {
        Self::is_well_formed(code).then(|| Self(code.to_ascii_uppercase()))
    }

    /// The upper-cased code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Currency settings that only exist for the currency style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyConfig {
    /// Currency to format amounts in
    pub code: CurrencyCode,
    /// How the currency is labelled
    pub display: CurrencyDisplay,
}

/// Validated style, carrying the fields that only apply to some styles
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StyleConfig {
    /// Plain number
    #[default]
    Decimal,
    /// Percentage
    Percent,
    /// Monetary amount
    Currency(CurrencyConfig),
}

impl StyleConfig {
    /// The plain style keyword
    pub fn style(&self) -> Style {
        match self {
            StyleConfig::Decimal => Style::Decimal,
            StyleConfig::Percent => Style::Percent,
            StyleConfig::Currency(_) => Style::Currency,
        }
    }

    /// Currency settings, if the style is currency
    pub fn currency(&self) -> Option<&CurrencyConfig> {
        match self {
            StyleConfig::Currency(config) => Some(config),
            _ => None,
        }
    }
}

/// Inclusive lower and upper bound on a digit count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitRange {
    /// Minimum number of digits shown
    pub minimum: u8,
    /// Maximum number of digits shown
    pub maximum: u8,
}

impl DigitRange {
    /// Create a range; callers are expected to have validated `minimum <= maximum`
    pub fn new(minimum: u8, maximum: u8) -> Self {
        Self { minimum, maximum }
    }
}

/// Fully validated and defaulted options
///
/// Both fraction and significant digit bounds may be present. The engine
/// decides which pair governs formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    /// Style with its style-specific settings
    pub style: StyleConfig,
    /// Minimum number of integer digits (1-21)
    pub minimum_integer_digits: u8,
    /// Fraction digit bounds (0-20)
    pub fraction_digits: DigitRange,
    /// Significant digit bounds (1-21), only when requested
    pub significant_digits: Option<DigitRange>,
    /// Whether grouping separators are used
    pub use_grouping: bool,
    /// Locale matching algorithm
    pub locale_matcher: LocaleMatcher,
    /// Numbering system requested through options
    pub numbering_system: Option<String>,
}

impl Default for ValidatedOptions {
    fn default() -> Self {
        Self {
            style: StyleConfig::Decimal,
            minimum_integer_digits: 1,
            fraction_digits: DigitRange::new(0, 3),
            significant_digits: None,
            use_grouping: true,
            locale_matcher: LocaleMatcher::BestFit,
            numbering_system: None,
        }
    }
}

/// Result of locale negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedLocale {
    /// Canonical locale tag without extensions, e.g. `de-DE`
    pub locale: String,
    /// Honored Unicode extension, e.g. `-u-nu-arab`, or empty
    pub extension: String,
    /// Numbering system the locale will use
    pub numbering_system: Option<String>,
}

impl NegotiatedLocale {
    /// Locale tag with the honored extension appended
    pub fn full_tag(&self) -> String {
        format!("{}{}", self.locale, self.extension)
    }
}

/// Snapshot of the effective configuration of a number format
///
/// Currency fields exist only for the currency style and significant digits
/// only when they were requested, mirroring the validated options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Locale the engine formats with
    pub locale: String,
    /// Numbering system the engine formats with
    pub numbering_system: String,
    /// Style with its style-specific settings
    pub style: StyleConfig,
    /// Whether grouping separators are used
    pub use_grouping: bool,
    /// Minimum number of integer digits
    pub minimum_integer_digits: u8,
    /// Fraction digit bounds
    pub fraction_digits: DigitRange,
    /// Significant digit bounds, only when requested
    pub significant_digits: Option<DigitRange>,
}

impl ResolvedOptions {
    /// Currency code, for the currency style
    pub fn currency(&self) -> Option<&str> {
        self.style.currency().map(|c| c.code.as_str())
    }

    /// Currency display, for the currency style
    pub fn currency_display(&self) -> Option<CurrencyDisplay> {
        self.style.currency().map(|c| c.display)
    }

    /// Render the snapshot as a fresh JSON record with camelCase keys
    pub fn to_record(&self) -> serde_json::Map<String, serde_json::Value> {
        use serde_json::Value;

        let mut record = serde_json::Map::new();
        record.insert("locale".into(), Value::from(self.locale.as_str()));
        record.insert(
            "numberingSystem".into(),
            Value::from(self.numbering_system.as_str()),
        );
        record.insert("style".into(), Value::from(self.style.style().keyword()));
        if let Some(currency) = self.style.currency() {
            record.insert("currency".into(), Value::from(currency.code.as_str()));
            record.insert(
                "currencyDisplay".into(),
                Value::from(currency.display.keyword()),
            );
        }
        record.insert("useGrouping".into(), Value::from(self.use_grouping));
        record.insert(
            "minimumIntegerDigits".into(),
            Value::from(self.minimum_integer_digits),
        );
        record.insert(
            "minimumFractionDigits".into(),
            Value::from(self.fraction_digits.minimum),
        );
        record.insert(
            "maximumFractionDigits".into(),
            Value::from(self.fraction_digits.maximum),
        );
        if let Some(significant) = self.significant_digits {
            record.insert(
                "minimumSignificantDigits".into(),
                Value::from(significant.minimum),
            );
            record.insert(
                "maximumSignificantDigits".into(),
                Value::from(significant.maximum),
            );
        }
        record
    }
}

impl Serialize for ResolvedOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.to_record();
        let mut map = serializer.serialize_map(Some(record.len()))?;
        for (key, value) in &record {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
