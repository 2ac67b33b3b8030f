//! Error types for table construction and configuration.

use thiserror::Error;

/// Errors raised by named lookups and configuration loading.
///
/// Lookups by a name that was never registered fail loudly; setters that
/// register new names do not.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table has no column with this name.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// No attribute with this key was ever registered.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// Attribute property name other than `name`, `default` or `value`.
    #[error("unknown attribute property '{0}'")]
    UnknownProperty(String),

    /// A value of the wrong shape was supplied.
    #[error("invalid value for '{field}': expected {expected}, got {actual}")]
    InvalidValue {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for TableError {
    fn from(err: serde_yaml::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
