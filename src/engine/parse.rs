//! Localized number parsing
//!
//! Reads text produced by the standard engine (and reasonable hand-written
//! variants of it) back into a number. Grouping separators are accepted
//! anywhere between digit runs, affixes are optional and native digits are
//! mapped to ASCII before parsing.

use winnow::ascii::digit1;
use winnow::combinator::{alt, eof, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{literal, take_while};
use winnow::{ModalResult, Parser};

use crate::locale::LocaleSettings;

/// Bidi controls that may surround signs; ignored when parsing
const BIDI_MARKS: &[char] = &['\u{200e}', '\u{200f}', '\u{061c}'];

/// Symbols one handle parses with, normalized once at build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSymbols {
    decimal: char,
    group: char,
    minus: String,
    infinity: String,
    prefix: String,
    suffix: String,
    digits: [char; 10],
}

fn strip_bidi(text: &str) -> String {
    text.chars().filter(|c| !BIDI_MARKS.contains(c)).collect()
}

impl ParseSymbols {
    /// Derive parse symbols from locale settings and the expanded affixes
    pub fn new(settings: &LocaleSettings, digits: &[char; 10], prefix: &str, suffix: &str) -> Self {
        let minus = strip_bidi(&settings.minus_sign);
        Self {
            decimal: settings.decimal_point,
            group: settings.thousands_separator,
            minus: if minus.is_empty() { "-".to_string() } else { minus },
            infinity: strip_bidi(&settings.infinity_symbol),
            prefix: strip_bidi(prefix).trim().to_string(),
            suffix: strip_bidi(suffix).trim().to_string(),
            digits: *digits,
        }
    }

    /// Drop bidi marks and map native digits to ASCII
    fn normalize(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !BIDI_MARKS.contains(c))
            .map(|c| match self.digits.iter().position(|d| *d == c) {
                Some(d) => char::from(b'0' + d as u8),
                None => c,
            })
            .collect()
    }
}

fn whitespace<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(0.., |c: char| c.is_whitespace()).parse_next(input)
}

fn minus_sign(input: &mut &str, minus: &str) -> ModalResult<bool> {
    opt(alt((literal(minus), literal("-"), literal("\u{2212}"))))
        .map(|sign: Option<&str>| sign.is_some())
        .parse_next(input)
}

fn affix<'s>(input: &mut &'s str, affix: &str) -> ModalResult<Option<&'s str>> {
    opt(literal(affix)).parse_next(input)
}

fn infinity<'s>(input: &mut &'s str, symbol: &str) -> ModalResult<Option<&'s str>> {
    if symbol.is_empty() {
        return Ok(None);
    }
    opt(literal(symbol)).parse_next(input)
}

fn grouped_integer<'s>(
    input: &mut &'s str,
    group: char,
) -> ModalResult<Option<(&'s str, Vec<&'s str>)>> {
    opt((digit1, repeat(0.., preceded(group, digit1)))).parse_next(input)
}

fn fraction<'s>(input: &mut &'s str, decimal: char) -> ModalResult<Option<&'s str>> {
    opt(preceded(decimal, digit1)).parse_next(input)
}

fn end<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    eof.parse_next(input)
}

/// The unsigned numeric body: the infinity symbol or digits
fn magnitude(input: &mut &str, symbols: &ParseSymbols) -> ModalResult<f64> {
    if infinity(input, &symbols.infinity)?.is_some() {
        return Ok(f64::INFINITY);
    }

    let integer = grouped_integer(input, symbols.group)?;
    let fraction_digits = fraction(input, symbols.decimal)?;

    let mut text = String::new();
    match integer {
        Some((head, tail)) => {
            text.push_str(head);
            tail.iter().for_each(|chunk| text.push_str(chunk));
        }
        None if fraction_digits.is_some() => text.push('0'),
        None => return Err(ErrMode::Backtrack(ContextError::new())),
    }
    if let Some(digits) = fraction_digits {
        text.push('.');
        text.push_str(digits);
    }

    text.parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

/// Sign, optional prefix, body, optional suffix and nothing else
fn localized_number(input: &mut &str, symbols: &ParseSymbols) -> ModalResult<f64> {
    whitespace(input)?;
    let mut negative = minus_sign(input, &symbols.minus)?;
    whitespace(input)?;
    affix(input, &symbols.prefix)?;
    whitespace(input)?;
    if !negative {
        negative = minus_sign(input, &symbols.minus)?;
        whitespace(input)?;
    }
    let value = magnitude(input, symbols)?;
    whitespace(input)?;
    affix(input, &symbols.suffix)?;
    whitespace(input)?;
    end(input)?;
    Ok(if negative { -value } else { value })
}

/// Parse localized text; anything unreadable yields NaN
pub fn parse_localized(text: &str, symbols: &ParseSymbols) -> f64 {
    let normalized = symbols.normalize(text);
    let mut input = normalized.as_str();
    localized_number(&mut input, symbols).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::digit_table;
    use crate::locale::LocaleDatabase;

    fn symbols(locale: &str, prefix: &str, suffix: &str) -> ParseSymbols {
        let database = LocaleDatabase::global();
        let settings = database.settings_or_default(locale);
        let digits = digit_table(settings.default_numbering_system()).unwrap();
        ParseSymbols::new(&settings, &digits, prefix, suffix)
    }

    #[test]
    fn test_plain_numbers() {
        let en = symbols("en-US", "", "");
        assert_eq!(parse_localized("1234", &en), 1234.0);
        assert_eq!(parse_localized("1,234,567.25", &en), 1234567.25);
        assert_eq!(parse_localized("  -0.5 ", &en), -0.5);
        assert_eq!(parse_localized(".75", &en), 0.75);
        assert_eq!(parse_localized("−3", &en), -3.0);
        assert_eq!(parse_localized("∞", &en), f64::INFINITY);
        assert_eq!(parse_localized("-∞", &en), f64::NEG_INFINITY);
    }

    #[test]
    fn test_unparseable_is_nan() {
        let en = symbols("en-US", "", "");
        for text in ["", "abc", "1.2.3", "12abc", "1,", "--1", "."] {
            assert!(parse_localized(text, &en).is_nan(), "{text:?} should not parse");
        }
    }

    #[test]
    fn test_affixes() {
        let en = symbols("en-US", "$", "");
        assert_eq!(parse_localized("$1,234.50", &en), 1234.5);
        assert_eq!(parse_localized("-$3.00", &en), -3.0);
        assert_eq!(parse_localized("$-3.00", &en), -3.0);
        assert_eq!(parse_localized("12", &en), 12.0);
        assert!(parse_localized("12$", &en).is_nan());
    }

    #[test]
    fn test_german_symbols() {
        let de = symbols("de-DE", "", "\u{a0}€");
        assert_eq!(parse_localized("1.234,5\u{a0}€", &de), 1234.5);
        assert_eq!(parse_localized("-0,01 €", &de), -0.01);
    }

    #[test]
    fn test_native_digits() {
        let ar = symbols("ar-EG", "", "");
        assert_eq!(parse_localized("١٬٢٣٤٫٥", &ar), 1234.5);
        assert_eq!(parse_localized("\u{61c}-٥", &ar), -5.0);
    }
}
