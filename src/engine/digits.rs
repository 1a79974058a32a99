//! Decimal digit strings, rounding and numbering systems

use crate::types::DigitRange;

/// Digits of a non-negative finite number around a decimal point
///
/// The value is `0.d0 d1 d2 ... × 10^point`. An empty digit list is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalDigits {
    digits: Vec<u8>,
    point: i32,
}

impl DecimalDigits {
    /// Shortest digits that round-trip to `magnitude`
    pub fn from_f64(magnitude: f64) -> Self {
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Self {
                digits: Vec::new(),
                point: 0,
            };
        }

        // `{:e}` yields the shortest round-trip form, e.g. "1.2345e3"
        let text = format!("{:e}", magnitude.abs());
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }

        Self {
            digits,
            point: exponent + 1,
        }
    }

    /// Whether the digits are all zero
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Round half away from zero, keeping at most `max` fraction digits
    pub fn round_to_fraction(&mut self, max: u8) {
        self.round_at(self.point + i32::from(max));
    }

    /// Round half away from zero, keeping at most `max` significant digits
    pub fn round_to_significant(&mut self, max: u8) {
        self.round_at(i32::from(max));
    }

    fn round_at(&mut self, keep: i32) {
        if keep < 0 {
            self.digits.clear();
            return;
        }
        let keep = keep as usize;
        if self.digits.len() <= keep {
            return;
        }

        let round_up = self.digits[keep] >= 5;
        self.digits.truncate(keep);
        if round_up {
            let mut i = keep;
            loop {
                if i == 0 {
                    self.digits.insert(0, 1);
                    self.point += 1;
                    break;
                }
                i -= 1;
                if self.digits[i] == 9 {
                    self.digits[i] = 0;
                } else {
                    self.digits[i] += 1;
                    break;
                }
            }
        }

        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.point = 0;
        }
    }

    /// ASCII integer digits, without leading zeros (empty for values below one)
    pub fn integer_part(&self) -> String {
        if self.point <= 0 {
            return String::new();
        }
        let point = self.point as usize;
        let mut integer: String = self
            .digits
            .iter()
            .take(point)
            .map(|d| char::from(b'0' + d))
            .collect();
        while integer.len() < point {
            integer.push('0');
        }
        integer
    }

    /// ASCII fraction digits, without trailing zeros
    pub fn fraction_part(&self) -> String {
        if self.point >= self.digits.len() as i32 {
            return String::new();
        }
        let mut fraction = String::new();
        let skip = if self.point < 0 {
            fraction.extend(std::iter::repeat_n('0', (-self.point) as usize));
            0
        } else {
            self.point as usize
        };
        fraction.extend(self.digits.iter().skip(skip).map(|d| char::from(b'0' + d)));
        fraction
    }

    /// Integer and fraction strings with fraction digit bounds applied
    pub fn render_fraction(mut self, range: DigitRange) -> (String, String) {
        self.round_to_fraction(range.maximum);
        let mut fraction = self.fraction_part();
        pad_zeros(&mut fraction, range.minimum as usize);
        (self.integer_part(), fraction)
    }

    /// Integer and fraction strings with significant digit bounds applied
    pub fn render_significant(mut self, range: DigitRange) -> (String, String) {
        self.round_to_significant(range.maximum);
        let integer = self.integer_part();
        let mut fraction = self.fraction_part();

        let shown = if self.is_zero() {
            // A lone zero counts as one significant digit
            1 + fraction.len()
        } else if self.point > 0 {
            integer.len() + fraction.len()
        } else {
            fraction.len() - (-self.point) as usize
        };
        let padded = fraction.len() + (range.minimum as usize).saturating_sub(shown);
        pad_zeros(&mut fraction, padded);
        (integer, fraction)
    }
}

fn pad_zeros(digits: &mut String, len: usize) {
    while digits.len() < len {
        digits.push('0');
    }
}

/// Native digits zero through nine for a numbering system
pub fn digit_table(numbering_system: &str) -> Option<[char; 10]> {
    let zero: u32 = match numbering_system {
        "latn" => 0x30,
        "arab" => 0x660,
        "arabext" => 0x6F0,
        "beng" => 0x9E6,
        "deva" => 0x966,
        "fullwide" => 0xFF10,
        "thai" => 0xE50,
        "hanidec" => {
            return Some(['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九']);
        }
        _ => return None,
    };

    let mut table = ['0'; 10];
    for (offset, slot) in table.iter_mut().enumerate() {
        *slot = char::from_u32(zero + offset as u32)?;
    }
    Some(table)
}

/// Insert a separator between every three integer digits from the right
pub fn group_digits(integer: &str, separator: char) -> String {
    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (count, digit) in digits.iter().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(*digit);
    }
    grouped.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fraction(value: f64, min: u8, max: u8) -> (String, String) {
        DecimalDigits::from_f64(value).render_fraction(DigitRange::new(min, max))
    }

    fn significant(value: f64, min: u8, max: u8) -> (String, String) {
        DecimalDigits::from_f64(value).render_significant(DigitRange::new(min, max))
    }

    fn pair(integer: &str, fraction: &str) -> (String, String) {
        (integer.to_string(), fraction.to_string())
    }

    #[test]
    fn test_fraction_rounding() {
        assert_eq!(fraction(123.456, 0, 2), pair("123", "46"));
        assert_eq!(fraction(1234.5678, 0, 3), pair("1234", "568"));
        assert_eq!(fraction(0.995, 2, 2), pair("1", "00"));
        assert_eq!(fraction(1.005, 0, 2), pair("1", "01"));
        assert_eq!(fraction(2.5, 0, 0), pair("3", ""));
        assert_eq!(fraction(0.0004, 0, 3), pair("", ""));
        assert_eq!(fraction(0.0005, 0, 3), pair("", "001"));
        assert_eq!(fraction(999.9996, 0, 3), pair("1000", ""));
    }

    #[test]
    fn test_fraction_padding() {
        assert_eq!(fraction(1.5, 3, 5), pair("1", "500"));
        assert_eq!(fraction(0.0, 2, 2), pair("", "00"));
        assert_eq!(fraction(1.0e21, 0, 0), pair("1000000000000000000000", ""));
    }

    #[test]
    fn test_significant_rounding() {
        assert_eq!(significant(123.456, 1, 10), pair("123", "456"));
        assert_eq!(significant(123.456, 1, 2), pair("120", ""));
        assert_eq!(significant(0.012345, 1, 3), pair("", "0123"));
        assert_eq!(significant(99.99, 1, 3), pair("100", ""));
    }

    #[test]
    fn test_significant_padding() {
        assert_eq!(significant(1200.0, 5, 21), pair("1200", "0"));
        assert_eq!(significant(0.5, 3, 21), pair("", "500"));
        assert_eq!(significant(1.5, 4, 21), pair("1", "500"));
        assert_eq!(significant(0.012, 4, 21), pair("", "01200"));
        assert_eq!(significant(0.0, 3, 21), pair("", "00"));
    }

    #[test]
    fn test_digit_tables() {
        assert_eq!(digit_table("latn").unwrap()[7], '7');
        assert_eq!(digit_table("arab").unwrap()[1], '١');
        assert_eq!(digit_table("deva").unwrap()[0], '०');
        assert_eq!(digit_table("hanidec").unwrap()[3], '三');
        assert!(digit_table("klingon").is_none());
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1234567", ','), "1,234,567");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("1000", '.'), "1.000");
        assert_eq!(group_digits("", ','), "");
    }
}
