//! Input validation for custodia signup payloads.

use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum name length.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum police station name length.
pub const MAX_STATION_LENGTH: usize = 100;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty.
    #[error("name cannot be empty")]
    NameEmpty,

    /// Name is too long.
    #[error("name must be at most {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    /// Name contains control characters.
    #[error("name contains invalid characters")]
    NameInvalidChars,

    /// Email is empty.
    #[error("email cannot be empty")]
    EmailEmpty,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,

    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,

    /// Police station is empty.
    #[error("police station cannot be empty")]
    StationEmpty,

    /// Police station name is too long.
    #[error("police station must be at most {MAX_STATION_LENGTH} characters")]
    StationTooLong,
}

/// Validate a full name.
///
/// Requirements:
/// - Not empty (after trimming)
/// - At most 100 characters
/// - No control characters
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameEmpty);
    }

    // Length in characters, not bytes
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(ValidationError::NameInvalidChars);
    }

    Ok(())
}

/// Validate an email address.
///
/// Identity is keyed on email, so unlike most profile fields it is
/// required. The format check is intentionally simple: one @ with a
/// dotted, non-empty domain and no whitespace.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::EmailInvalidFormat);
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() {
        return Err(ValidationError::EmailInvalidFormat);
    }

    if !domain.contains('.') {
        return Err(ValidationError::EmailInvalidFormat);
    }

    if domain.split('.').any(|p| p.is_empty()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    if email.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Validate a password.
///
/// Requirements: 8-128 characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Validate a police station name.
pub fn validate_station(station: &str) -> Result<(), ValidationError> {
    if station.trim().is_empty() {
        return Err(ValidationError::StationEmpty);
    }
    if station.chars().count() > MAX_STATION_LENGTH {
        return Err(ValidationError::StationTooLong);
    }
    Ok(())
}

/// Validate all signup fields at once.
///
/// Returns the first validation error encountered.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    police_station: &str,
) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_password(password)?;
    validate_station(police_station)?;
    Ok(())
}
