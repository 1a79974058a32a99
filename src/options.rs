//! Option validation
//!
//! Turns an untyped option map into [`ValidatedOptions`], applying defaults
//! and range checks. The first invalid option aborts validation.

use serde_json::{Map, Value};

use crate::error::{NumberFormatError, Result};
use crate::types::{
    CurrencyCode, CurrencyConfig, CurrencyDisplay, DigitRange, LocaleMatcher, OptionKeyword,
    Style, StyleConfig, ValidatedOptions,
};
use crate::value::{describe, to_boolean, to_number};

/// Caller-supplied, unvalidated options
pub type RawOptions = Map<String, Value>;

/// Upper bound for `minimumIntegerDigits` and significant digit options
pub const MAX_INTEGER_DIGITS: u8 = 21;
/// Upper bound for fraction digit options
pub const MAX_FRACTION_DIGITS: u8 = 20;
/// Default for `maximumFractionDigits`
pub const DEFAULT_MAX_FRACTION_DIGITS: u8 = 3;

/// Look an option up; `null` counts as absent
fn lookup<'a>(options: &'a RawOptions, name: &str) -> Option<&'a Value> {
    options.get(name).filter(|v| !v.is_null())
}

/// Read a keyword option
///
/// A present value must be a string naming one of `T::ALL`; absent yields
/// `default`.
pub fn get_enum_option<T: OptionKeyword>(options: &RawOptions, name: &str, default: T) -> Result<T> {
    let Some(value) = lookup(options, name) else {
        return Ok(default);
    };

    value
        .as_str()
        .and_then(T::from_keyword)
        .ok_or_else(|| NumberFormatError::InvalidOption {
            option: name.to_string(),
            value: describe(value),
        })
}

/// Read a numeric option, range-check it against `[min, max]` and floor it
pub fn get_numeric_option(
    options: &RawOptions,
    name: &str,
    min: u8,
    max: u8,
    default: u8,
) -> Result<u8> {
    let Some(value) = lookup(options, name) else {
        return Ok(default);
    };

    let out_of_range = || NumberFormatError::OutOfRange {
        option: name.to_string(),
        value: describe(value),
        min: min.into(),
        max: max.into(),
    };

    let number = to_number(value).ok_or_else(out_of_range)?;
    if number.is_nan() || number < f64::from(min) || number > f64::from(max) {
        return Err(out_of_range());
    }
    Ok(number.floor() as u8)
}

/// Read a boolean option by truthiness
pub fn get_boolean_option(options: &RawOptions, name: &str, default: bool) -> bool {
    lookup(options, name).map_or(default, to_boolean)
}

/// Read an optional string option; a present non-string is rejected
pub fn get_string_option<'a>(options: &'a RawOptions, name: &str) -> Result<Option<&'a str>> {
    match lookup(options, name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(NumberFormatError::InvalidOption {
            option: name.to_string(),
            value: describe(other),
        }),
    }
}

/// Whether a string has the shape of a Unicode extension type (3-8 alphanumerics)
pub fn is_well_formed_unicode_type(value: &str) -> bool {
    (3..=8).contains(&value.len()) && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validate raw options into [`ValidatedOptions`]
///
/// # Examples
/// ```
/// use intl_number_format::options::validate_options;
/// use serde_json::json;
///
/// let raw = json!({"style": "currency", "currency": "eur"});
/// let validated = validate_options(raw.as_object().unwrap()).unwrap();
/// assert_eq!(validated.style.currency().unwrap().code.as_str(), "EUR");
/// ```
pub fn validate_options(options: &RawOptions) -> Result<ValidatedOptions> {
    let locale_matcher = get_enum_option(options, "localeMatcher", LocaleMatcher::BestFit)?;
    let style = resolve_style(options)?;

    let minimum_integer_digits =
        get_numeric_option(options, "minimumIntegerDigits", 1, MAX_INTEGER_DIGITS, 1)?;
    let fraction_digits = resolve_fraction_digits(options)?;
    let significant_digits = resolve_significant_digits(options)?;
    let use_grouping = get_boolean_option(options, "useGrouping", true);

    let numbering_system = match get_string_option(options, "numberingSystem")? {
        Some(nu) if is_well_formed_unicode_type(nu) => Some(nu.to_ascii_lowercase()),
        Some(nu) => {
            return Err(NumberFormatError::InvalidOption {
                option: "numberingSystem".to_string(),
                value: format!("\"{nu}\""),
            });
        }
        None => None,
    };

    Ok(ValidatedOptions {
        style,
        minimum_integer_digits,
        fraction_digits,
        significant_digits,
        use_grouping,
        locale_matcher,
        numbering_system,
    })
}

fn resolve_style(options: &RawOptions) -> Result<StyleConfig> {
    let style = get_enum_option(options, "style", Style::Decimal)?;

    // A supplied code must be well formed even when the style ignores it
    let currency = match get_string_option(options, "currency")? {
        Some(code) => Some(CurrencyCode::parse(code).ok_or_else(|| {
            NumberFormatError::InvalidOption {
                option: "currency".to_string(),
                value: format!("\"{code}\""),
            }
        })?),
        None => None,
    };

    match style {
        Style::Decimal => Ok(StyleConfig::Decimal),
        Style::Percent => Ok(StyleConfig::Percent),
        Style::Currency => {
            let code = currency.ok_or_else(|| NumberFormatError::MissingRequiredOption {
                option: "currency".to_string(),
                required_by: "style \"currency\"".to_string(),
            })?;
            let display = get_enum_option(options, "currencyDisplay", CurrencyDisplay::Symbol)?;
            Ok(StyleConfig::Currency(CurrencyConfig { code, display }))
        }
    }
}

fn resolve_fraction_digits(options: &RawOptions) -> Result<DigitRange> {
    let minimum =
        get_numeric_option(options, "minimumFractionDigits", 0, MAX_FRACTION_DIGITS, 0)?;
    let maximum = get_numeric_option(
        options,
        "maximumFractionDigits",
        minimum,
        MAX_FRACTION_DIGITS,
        DEFAULT_MAX_FRACTION_DIGITS.max(minimum),
    )?;
    Ok(DigitRange::new(minimum, maximum))
}

fn resolve_significant_digits(options: &RawOptions) -> Result<Option<DigitRange>> {
    let requested = lookup(options, "minimumSignificantDigits").is_some()
        || lookup(options, "maximumSignificantDigits").is_some();
    if !requested {
        return Ok(None);
    }

    let minimum =
        get_numeric_option(options, "minimumSignificantDigits", 1, MAX_INTEGER_DIGITS, 1)?;
    let maximum = get_numeric_option(
        options,
        "maximumSignificantDigits",
        minimum,
        MAX_INTEGER_DIGITS,
        MAX_INTEGER_DIGITS,
    )?;
    Ok(Some(DigitRange::new(minimum, maximum)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawOptions {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_defaults() {
        let validated = validate_options(&RawOptions::new()).unwrap();
        assert_eq!(validated, ValidatedOptions::default());
    }

    #[test]
    fn test_enum_option_is_case_sensitive() {
        let err = validate_options(&raw(json!({"style": "Currency"}))).unwrap_err();
        assert!(matches!(err, NumberFormatError::InvalidOption { ref option, .. } if option == "style"));
    }

    #[test]
    fn test_enum_option_rejects_non_string() {
        let err = get_enum_option(&raw(json!({"style": 1})), "style", Style::Decimal).unwrap_err();
        assert!(matches!(err, NumberFormatError::InvalidOption { .. }));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let validated =
            validate_options(&raw(json!({"style": null, "minimumIntegerDigits": null}))).unwrap();
        assert_eq!(validated.style, StyleConfig::Decimal);
        assert_eq!(validated.minimum_integer_digits, 1);
    }

    #[test]
    fn test_numeric_option_floors() {
        let options = raw(json!({"minimumIntegerDigits": 4.9}));
        assert_eq!(
            get_numeric_option(&options, "minimumIntegerDigits", 1, 21, 1).unwrap(),
            4
        );
        let options = raw(json!({"minimumIntegerDigits": "7"}));
        assert_eq!(
            get_numeric_option(&options, "minimumIntegerDigits", 1, 21, 1).unwrap(),
            7
        );
    }

    #[test]
    fn test_numeric_option_out_of_range() {
        for bad in [json!(0), json!(22), json!(21.5), json!("abc"), json!([3])] {
            let options = raw(json!({ "minimumIntegerDigits": bad }));
            let err = validate_options(&options).unwrap_err();
            assert!(
                matches!(err, NumberFormatError::OutOfRange { ref option, min: 1, max: 21, .. } if option == "minimumIntegerDigits"),
                "unexpected error {err:?}"
            );
        }
    }

    #[test]
    fn test_maximum_fraction_tracks_minimum() {
        let validated = validate_options(&raw(json!({"minimumFractionDigits": 5}))).unwrap();
        assert_eq!(validated.fraction_digits, DigitRange::new(5, 5));

        let err = validate_options(&raw(json!({
            "minimumFractionDigits": 5,
            "maximumFractionDigits": 4
        })))
        .unwrap_err();
        assert!(matches!(err, NumberFormatError::OutOfRange { min: 5, max: 20, .. }));
    }

    #[test]
    fn test_significant_digits_opt_in() {
        let validated = validate_options(&raw(json!({"maximumFractionDigits": 2}))).unwrap();
        assert_eq!(validated.significant_digits, None);

        let validated = validate_options(&raw(json!({"maximumSignificantDigits": 10}))).unwrap();
        assert_eq!(validated.significant_digits, Some(DigitRange::new(1, 10)));

        let validated = validate_options(&raw(json!({"minimumSignificantDigits": 3}))).unwrap();
        assert_eq!(validated.significant_digits, Some(DigitRange::new(3, 21)));
    }

    #[test]
    fn test_currency_required_for_currency_style() {
        let err = validate_options(&raw(json!({"style": "currency"}))).unwrap_err();
        assert!(matches!(err, NumberFormatError::MissingRequiredOption { ref option, .. } if option == "currency"));
    }

    #[test]
    fn test_currency_normalized_after_shape_check() {
        let validated = validate_options(&raw(json!({
            "style": "currency",
            "currency": "jPy",
            "currencyDisplay": "name"
        })))
        .unwrap();
        let currency = validated.style.currency().unwrap();
        assert_eq!(currency.code.as_str(), "JPY");
        assert_eq!(currency.display, CurrencyDisplay::Name);
    }

    #[test]
    fn test_malformed_currency_rejected_for_any_style() {
        for style in ["currency", "decimal"] {
            let err = validate_options(&raw(json!({"style": style, "currency": "US1"}))).unwrap_err();
            assert!(matches!(err, NumberFormatError::InvalidOption { ref option, .. } if option == "currency"));
        }
    }

    #[test]
    fn test_currency_display_ignored_outside_currency_style() {
        let validated =
            validate_options(&raw(json!({"style": "percent", "currencyDisplay": "bogus"}))).unwrap();
        assert_eq!(validated.style, StyleConfig::Percent);
    }

    #[test]
    fn test_use_grouping_coerced() {
        let validated = validate_options(&raw(json!({"useGrouping": 0}))).unwrap();
        assert!(!validated.use_grouping);
        let validated = validate_options(&raw(json!({"useGrouping": "false"}))).unwrap();
        assert!(validated.use_grouping);
    }

    #[test]
    fn test_numbering_system_option() {
        let validated = validate_options(&raw(json!({"numberingSystem": "Arab"}))).unwrap();
        assert_eq!(validated.numbering_system.as_deref(), Some("arab"));

        let err = validate_options(&raw(json!({"numberingSystem": "ar"}))).unwrap_err();
        assert!(matches!(err, NumberFormatError::InvalidOption { .. }));
    }

    #[test]
    fn test_locale_matcher_option() {
        let validated = validate_options(&raw(json!({"localeMatcher": "lookup"}))).unwrap();
        assert_eq!(validated.locale_matcher, LocaleMatcher::Lookup);
        let err = validate_options(&raw(json!({"localeMatcher": "bestfit"}))).unwrap_err();
        assert!(matches!(err, NumberFormatError::InvalidOption { .. }));
    }
}
