use std::fmt;

/// Result type for notizia-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// User-supplied field failed validation
    Validation { field: &'static str, message: String },

    /// Enumeration value not recognized
    UnknownVariant { kind: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation { field, message } => write!(f, "Invalid {}: {}", field, message),
            Error::UnknownVariant { kind, value } => write!(f, "Unknown {}: '{}'", kind, value),
        }
    }
}

impl std::error::Error for Error {}
