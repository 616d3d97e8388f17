//! Error types for custodia.

use thiserror::Error;

/// Common error type for custodia.
#[derive(Error, Debug)]
pub enum CustodiaError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx layer; conversions are automatic.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (bad credentials or unapproved account).
    #[error("{0}")]
    Auth(String),

    /// A conflicting record already exists (duplicate station admin).
    #[error("{0}")]
    Conflict(String),

    /// A required precondition does not hold (no admin for the station).
    #[error("{0}")]
    Precondition(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Mail notification failed to build or send.
    #[error("notification error: {0}")]
    Notification(String),

    /// Token is invalid, expired, or issued for another purpose.
    #[error("token error: {0}")]
    Token(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for CustodiaError {
    fn from(e: sqlx::Error) -> Self {
        CustodiaError::Database(e.to_string())
    }
}

/// Result type alias for custodia operations.
pub type Result<T> = std::result::Result<T, CustodiaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = CustodiaError::Auth("invalid credentials".to_string());
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = CustodiaError::Conflict("an admin already exists".to_string());
        assert_eq!(err.to_string(), "an admin already exists");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = CustodiaError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CustodiaError::Validation("email is malformed".to_string());
        assert_eq!(err.to_string(), "validation error: email is malformed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CustodiaError = io_err.into();
        assert!(matches!(err, CustodiaError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(CustodiaError::Token("expired".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
