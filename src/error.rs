//! Error types for number format construction, formatting and parsing.

use thiserror::Error;

/// Result type for number format operations.
pub type Result<T> = std::result::Result<T, NumberFormatError>;

/// Boxed error raised by an [`Engine`](crate::engine::Engine) implementation.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while building or using a number format.
#[derive(Debug, Error)]
pub enum NumberFormatError {
    /// An option has the wrong type or a value outside its enumerated set.
    #[error("Invalid value {value} for option {option}")]
    InvalidOption {
        /// Name of the offending option.
        option: String,
        /// Rendering of the rejected value.
        value: String,
    },

    /// A numeric option is NaN or outside its valid bounds.
    #[error("Value {value} for option {option} is out of range {min}..={max}")]
    OutOfRange {
        /// Name of the offending option.
        option: String,
        /// Rendering of the rejected value.
        value: String,
        /// Lowest accepted value.
        min: u32,
        /// Highest accepted value.
        max: u32,
    },

    /// The selected style requires an option that was not supplied.
    #[error("Option {option} is required with {required_by}")]
    MissingRequiredOption {
        /// Name of the missing option.
        option: String,
        /// The setting that made it mandatory.
        required_by: String,
    },

    /// The formatter was already initialized.
    #[error("Trying to re-initialize a number format object")]
    Reinitialization,

    /// A method was called on a formatter that was never initialized.
    #[error("Method {method} called on an uninitialized number format")]
    InvalidReceiver {
        /// The method that was invoked.
        method: &'static str,
    },

    /// A format/parse argument cannot be coerced to the required type.
    #[error("Cannot convert {value} to a {expected}")]
    InvalidArgument {
        /// Rendering of the rejected value.
        value: String,
        /// Type that was required.
        expected: &'static str,
    },

    /// A requested locale is not a structurally valid language tag.
    #[error("Invalid language tag: {0}")]
    InvalidLanguageTag(String),

    /// Failure raised by the formatting engine, passed through unchanged.
    #[error(transparent)]
    Engine(EngineError),
}

impl NumberFormatError {
    /// Wrap an engine failure.
    pub fn engine<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Engine(Box::new(error))
    }

    /// Check if this error was raised while validating options.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidOption { .. } | Self::OutOfRange { .. } | Self::MissingRequiredOption { .. }
        )
    }
}

/// Errors raised while loading a TOML locale database.
#[derive(Debug, Error)]
pub enum LocaleDataError {
    /// The TOML text could not be parsed.
    #[error("Error parsing locale data: {0}")]
    Toml(#[from] toml::de::Error),

    /// The TOML document does not have the expected shape.
    #[error("Malformed locale data: {0}")]
    Malformed(String),
}
