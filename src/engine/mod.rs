//! Formatting engine boundary
//!
//! The number format never renders or reads digits itself. It builds one
//! engine handle at construction and hands every format/parse call to the
//! [`Engine`] that produced it. [`StandardEngine`] is the table-driven
//! implementation used by default.

mod digits;
mod parse;
mod standard;

use crate::types::ValidatedOptions;

pub use digits::{DecimalDigits, digit_table};
pub use standard::{StandardEngine, StandardEngineError, StandardHandle};

/// Locale data an engine reports back after building a handle
///
/// The builder pre-fills it with the negotiated values; the engine overwrites
/// what it actually uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineResolved {
    /// Locale tag the engine formats with, including honored extensions
    pub locale: String,
    /// Numbering system the engine formats with
    pub numbering_system: String,
}

/// A locale-aware numeral formatting and parsing service
pub trait Engine {
    /// Per-formatter state built once at construction
    type Handle;
    /// Failure raised by any engine operation
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build a handle for a full locale tag and validated configuration
    fn build(
        &self,
        locale_tag: &str,
        config: &ValidatedOptions,
        resolved: &mut EngineResolved,
    ) -> Result<Self::Handle, Self::Error>;

    /// Render a number
    fn format(&self, handle: &Self::Handle, value: f64) -> Result<String, Self::Error>;

    /// Read a number back; text that cannot be read yields NaN
    fn parse(&self, handle: &Self::Handle, text: &str) -> Result<f64, Self::Error>;
}
