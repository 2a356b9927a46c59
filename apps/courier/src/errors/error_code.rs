//! Error codes for the courier HTTP API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code maps 1:1 to the SCREAMING_SNAKE_CASE string that appears in
//! problem-details responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Malformed request body, path or query
    BadRequest,
    /// A required form or multipart field was not sent
    MissingField,
    /// A field was sent but could not be parsed
    InvalidField,
    /// Upload filename is empty or not a plain file name
    InvalidFilename,
    /// General validation error
    ValidationError,

    // Resource Not Found
    NotFound,

    // Conflicts
    /// Username already registered
    UsernameTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    /// Writing or reading the upload directory failed
    StorageError,
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidField => "INVALID_FIELD",
            Self::InvalidFilename => "INVALID_FILENAME",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::StorageError => "STORAGE_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
