pub mod engine;
pub mod error;
pub mod locale;
pub mod number_format;
pub mod options;
pub mod types;
pub mod value;

// Main API exports
pub use engine::{Engine, EngineResolved, StandardEngine};
pub use error::{NumberFormatError, Result};
pub use locale::{LocaleDatabase, LocaleResolver, Locales};
pub use number_format::{NumberFormat, NumberFormatter, supported_locales_of};
pub use options::{RawOptions, validate_options};
pub use types::*;
