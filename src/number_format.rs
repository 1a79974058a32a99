//! Locale-aware number format objects
//!
//! A [`NumberFormat`] validates its options, negotiates a locale, binds an
//! engine handle and a [`ResolvedOptions`] snapshot exactly once, and then
//! formats and parses through that bound state.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::engine::{Engine, EngineResolved, StandardEngine};
use crate::error::{NumberFormatError, Result};
use crate::locale::{
    ExtensionOptions, LocaleDatabase, LocaleResolver, Locales, canonicalize_locale_list,
};
use crate::options::{RawOptions, get_enum_option, validate_options};
use crate::types::{LocaleMatcher, ResolvedOptions, ValidatedOptions};
use crate::value::{describe, to_number, to_string};

/// Operations every number format offers once constructed
pub trait NumberFormatter {
    /// Render a value, coercing it to a number first
    fn format(&self, value: &Value) -> Result<String>;

    /// Read a number from a value's string form; unreadable text yields NaN
    fn parse(&self, value: &Value) -> Result<f64>;

    /// A fresh copy of the effective configuration
    fn resolved_options(&self) -> Result<ResolvedOptions>;
}

/// State bound once by a successful initialization
struct Bound<H> {
    handle: H,
    options: ValidatedOptions,
    resolved: ResolvedOptions,
}

/// A number format over an engine `E` and a locale resolver `R`
///
/// # Examples
/// ```
/// use intl_number_format::{NumberFormat, NumberFormatter};
/// use serde_json::json;
///
/// let options = json!({"style": "currency", "currency": "usd", "minimumFractionDigits": 2});
/// let nf = NumberFormat::new("en-US", options.as_object().unwrap()).unwrap();
/// assert_eq!(nf.format(&json!(1234.5)).unwrap(), "$1,234.50");
/// assert_eq!(nf.resolved_options().unwrap().currency(), Some("USD"));
/// ```
pub struct NumberFormat<E: Engine = StandardEngine, R: LocaleResolver = Arc<LocaleDatabase>> {
    engine: E,
    resolver: R,
    state: OnceLock<Bound<E::Handle>>,
}

impl NumberFormat {
    /// Construct with the embedded locale database and the standard engine
    pub fn new(locales: impl Into<Locales>, options: &RawOptions) -> Result<Self> {
        let database = LocaleDatabase::global();
        let format = Self::with_services(StandardEngine::new(database.clone()), database);
        format.initialize(locales, options)?;
        Ok(format)
    }

    /// Requested locales the embedded database supports, in request order
    pub fn supported_locales_of(
        locales: impl Into<Locales>,
        options: &RawOptions,
    ) -> Result<Vec<String>> {
        supported_locales_of(&LocaleDatabase::global(), locales, options)
    }
}

impl<E: Engine, R: LocaleResolver> NumberFormat<E, R> {
    /// Create an uninitialized number format over the given services
    ///
    /// Every operation fails with `InvalidReceiver` until
    /// [`initialize`](Self::initialize) succeeds.
    pub fn with_services(engine: E, resolver: R) -> Self {
        Self {
            engine,
            resolver,
            state: OnceLock::new(),
        }
    }

    /// Construct over the given services in one step
    pub fn try_new(
        engine: E,
        resolver: R,
        locales: impl Into<Locales>,
        options: &RawOptions,
    ) -> Result<Self> {
        let format = Self::with_services(engine, resolver);
        format.initialize(locales, options)?;
        Ok(format)
    }

    /// Validate, negotiate and bind the engine handle
    ///
    /// Fails with `Reinitialization` if this format was already initialized,
    /// leaving the existing state untouched.
    pub fn initialize(&self, locales: impl Into<Locales>, options: &RawOptions) -> Result<()> {
        if self.state.get().is_some() {
            return Err(NumberFormatError::Reinitialization);
        }

        let locales = locales.into();
        // Requested tags are checked right after localeMatcher, before any other option
        get_enum_option(options, "localeMatcher", LocaleMatcher::BestFit)?;
        canonicalize_locale_list(&locales)?;
        let validated = validate_options(options)?;

        let mut extensions = ExtensionOptions::new();
        if let Some(nu) = &validated.numbering_system {
            extensions.insert("nu".to_string(), nu.clone());
        }
        let negotiated = self
            .resolver
            .resolve(&locales, &extensions, validated.locale_matcher)?;

        let mut engine_resolved = EngineResolved {
            locale: negotiated.full_tag(),
            numbering_system: negotiated.numbering_system.clone().unwrap_or_default(),
        };
        let handle = self
            .engine
            .build(&negotiated.full_tag(), &validated, &mut engine_resolved)
            .map_err(NumberFormatError::engine)?;

        // Currency display is taken from the request; the engine is trusted to honor it
        let resolved = ResolvedOptions {
            locale: engine_resolved.locale,
            numbering_system: engine_resolved.numbering_system,
            style: validated.style.clone(),
            use_grouping: validated.use_grouping,
            minimum_integer_digits: validated.minimum_integer_digits,
            fraction_digits: validated.fraction_digits,
            significant_digits: validated.significant_digits,
        };

        tracing::debug!(
            locale = %resolved.locale,
            numbering_system = %resolved.numbering_system,
            style = ?resolved.style.style(),
            "initialized number format"
        );

        self.state
            .set(Bound {
                handle,
                options: validated,
                resolved,
            })
            .map_err(|_| NumberFormatError::Reinitialization)
    }

    /// Whether [`initialize`](Self::initialize) has succeeded
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// The engine this format delegates to
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The validated options, once initialized
    pub fn validated_options(&self) -> Option<&ValidatedOptions> {
        self.state.get().map(|bound| &bound.options)
    }

    fn bound(&self, method: &'static str) -> Result<&Bound<E::Handle>> {
        self.state
            .get()
            .ok_or(NumberFormatError::InvalidReceiver { method })
    }

    /// Render a number without coercion
    pub fn format_f64(&self, value: f64) -> Result<String> {
        let bound = self.bound("format")?;
        self.format_bound(bound, value)
    }

    fn format_bound(&self, bound: &Bound<E::Handle>, value: f64) -> Result<String> {
        // -0 and +0 format identically
        let value = if value == 0.0 { 0.0 } else { value };
        self.engine
            .format(&bound.handle, value)
            .map_err(NumberFormatError::engine)
    }
}

impl<E: Engine, R: LocaleResolver> NumberFormatter for NumberFormat<E, R> {
    fn format(&self, value: &Value) -> Result<String> {
        let bound = self.bound("format")?;
        let number = to_number(value).ok_or_else(|| NumberFormatError::InvalidArgument {
            value: describe(value),
            expected: "number",
        })?;
        self.format_bound(bound, number)
    }

    fn parse(&self, value: &Value) -> Result<f64> {
        let bound = self.bound("parse")?;
        let text = to_string(value).ok_or_else(|| NumberFormatError::InvalidArgument {
            value: describe(value),
            expected: "string",
        })?;
        self.engine
            .parse(&bound.handle, &text)
            .map_err(NumberFormatError::engine)
    }

    fn resolved_options(&self) -> Result<ResolvedOptions> {
        Ok(self.bound("resolvedOptions")?.resolved.clone())
    }
}

impl<E: Engine, R: LocaleResolver> fmt::Debug for NumberFormat<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberFormat")
            .field("resolved", &self.state.get().map(|bound| &bound.resolved))
            .finish_non_exhaustive()
    }
}

/// Requested locales a resolver supports, in request order
///
/// Only the `localeMatcher` option is read.
pub fn supported_locales_of<R: LocaleResolver + ?Sized>(
    resolver: &R,
    locales: impl Into<Locales>,
    options: &RawOptions,
) -> Result<Vec<String>> {
    let matcher = get_enum_option(options, "localeMatcher", LocaleMatcher::BestFit)?;
    resolver.supported_locales_of(&locales.into(), matcher)
}
