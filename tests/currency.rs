#[cfg(test)]
mod tests {
    use intl_number_format::{
        CurrencyDisplay, NumberFormat, NumberFormatError, NumberFormatter, Style,
    };
    use serde_json::{Value, json};

    // Helper function to format a value with currency options
    fn fmt_currency(value: f64, locale: &str, options: Value) -> Result<String, NumberFormatError> {
        let mut options = options.as_object().cloned().unwrap_or_default();
        options.insert("style".to_string(), json!("currency"));
        options
            .entry("minimumFractionDigits")
            .or_insert_with(|| json!(2));
        let nf = NumberFormat::new(locale, &options)?;
        nf.format(&json!(value))
    }

    #[test]
    fn test_currency_code_is_upper_cased() -> Result<(), NumberFormatError> {
        let options = json!({"style": "currency", "currency": "usd"});
        let nf = NumberFormat::new("en-US", options.as_object().unwrap())?;
        let resolved = nf.resolved_options()?;
        assert_eq!(resolved.style.style(), Style::Currency);
        assert_eq!(resolved.currency(), Some("USD"));
        assert_eq!(resolved.currency_display(), Some(CurrencyDisplay::Symbol));

        let record = resolved.to_record();
        assert_eq!(record["style"], json!("currency"));
        assert_eq!(record["currency"], json!("USD"));
        assert_eq!(record["currencyDisplay"], json!("symbol"));
        Ok(())
    }

    #[test]
    fn test_currency_symbol() -> Result<(), NumberFormatError> {
        let usd = json!({"currency": "USD"});
        assert_eq!(fmt_currency(1234.56, "en-US", usd.clone())?, "$1,234.56");
        assert_eq!(fmt_currency(-1234.56, "en-US", usd.clone())?, "-$1,234.56");
        assert_eq!(fmt_currency(0.0, "en-US", usd)?, "$0.00");

        let eur = json!({"currency": "EUR"});
        assert_eq!(fmt_currency(1234.56, "de-DE", eur.clone())?, "1.234,56\u{a0}€");
        assert_eq!(fmt_currency(1234.56, "fr-FR", eur)?, "1\u{202f}234,56\u{a0}€");
        Ok(())
    }

    #[test]
    fn test_currency_locale_symbols() -> Result<(), NumberFormatError> {
        let usd = json!({"currency": "USD"});
        assert_eq!(fmt_currency(5.0, "en-CA", usd)?, "US$5.00");

        let yen = json!({"currency": "JPY", "minimumFractionDigits": 0, "maximumFractionDigits": 0});
        assert_eq!(fmt_currency(12345.0, "ja-JP", yen.clone())?, "￥12,345");
        assert_eq!(fmt_currency(12345.0, "en-US", yen)?, "¥12,345");
        Ok(())
    }

    #[test]
    fn test_currency_display_code_and_name() -> Result<(), NumberFormatError> {
        let code = json!({"currency": "eur", "currencyDisplay": "code"});
        assert_eq!(fmt_currency(1.0, "en-US", code.clone())?, "EUR\u{a0}1.00");
        assert_eq!(fmt_currency(1.0, "de-DE", code)?, "1,00\u{a0}EUR");

        let name = json!({"currency": "GBP", "currencyDisplay": "name"});
        assert_eq!(fmt_currency(2.0, "en-GB", name)?, "2.00 British pounds");
        Ok(())
    }

    #[test]
    fn test_unknown_currency_uses_code() -> Result<(), NumberFormatError> {
        let options = json!({"currency": "xts", "currencyDisplay": "name"});
        assert_eq!(fmt_currency(3.0, "en-US", options)?, "3.00 XTS");
        Ok(())
    }

    #[test]
    fn test_currency_parse() -> Result<(), NumberFormatError> {
        let options = json!({"style": "currency", "currency": "EUR", "minimumFractionDigits": 2});
        let nf = NumberFormat::new("de-DE", options.as_object().unwrap())?;
        let text = nf.format(&json!(-9876.5))?;
        assert_eq!(text, "-9.876,50\u{a0}€");
        assert_eq!(nf.parse(&json!(text))?, -9876.5);
        assert_eq!(nf.parse(&json!("12,5"))?, 12.5);
        Ok(())
    }

    #[test]
    fn test_currency_required_for_currency_style() {
        let options = json!({"style": "currency"});
        let err = NumberFormat::new("en-US", options.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, NumberFormatError::MissingRequiredOption { .. }));
    }

    #[test]
    fn test_malformed_currency_rejected() {
        for (style, code) in [("currency", "US"), ("currency", "US1"), ("decimal", "EURO")] {
            let options = json!({"style": style, "currency": code});
            let err = NumberFormat::new("en-US", options.as_object().unwrap()).unwrap_err();
            assert!(
                matches!(err, NumberFormatError::InvalidOption { ref option, .. } if option == "currency"),
                "{code} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn test_currency_display_only_checked_for_currency() {
        let options = json!({"currencyDisplay": "bogus"});
        assert!(NumberFormat::new("en-US", options.as_object().unwrap()).is_ok());

        let options = json!({"style": "currency", "currency": "USD", "currencyDisplay": "bogus"});
        let err = NumberFormat::new("en-US", options.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, NumberFormatError::InvalidOption { .. }));
    }
}
