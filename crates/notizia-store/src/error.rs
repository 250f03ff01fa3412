use std::fmt;

/// Result type for notizia-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the storage layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Stored JSON (anamnesis) could not be encoded or decoded
    Serialization(serde_json::Error),

    /// Referenced record does not exist
    NotFound { kind: &'static str, id: i64 },

    /// Input rejected before it reached the backend
    Validation(notizia_types::Error),

    /// Database file was written by an incompatible version
    Schema(String),
}

impl Error {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        Error::NotFound { kind, id }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => {
                let msg = err.to_string();
                if msg.contains("no such column") || msg.contains("no such table") {
                    write!(
                        f,
                        "Database schema mismatch: {}. The database file may be damaged.",
                        msg
                    )
                } else {
                    write!(f, "Database error: {}", err)
                }
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Serialization(err) => write!(f, "Serialization error: {}", err),
            Error::NotFound { kind, id } => write!(f, "{} #{} not found", kind, id),
            Error::Validation(err) => write!(f, "{}", err),
            Error::Schema(msg) => write!(f, "Schema error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Serialization(err) => Some(err),
            Error::Validation(err) => Some(err),
            Error::NotFound { .. } | Error::Schema(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err)
    }
}

impl From<notizia_types::Error> for Error {
    fn from(err: notizia_types::Error) -> Self {
        Error::Validation(err)
    }
}
