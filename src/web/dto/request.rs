//! Request DTOs for the web API.

use serde::Deserialize;
use validator::Validate;

/// Admin signup request. The admin role is implied by the endpoint.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignupRequest {
    /// Full name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    /// Police station.
    #[validate(length(min = 1, message = "police station is required"))]
    pub police_station: String,
}

/// Officer / expert signup request.
///
/// The role arrives as a string and is parsed against the closed role
/// set in the handler, so unknown values are rejected with a 400.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfficerSignupRequest {
    /// Full name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    /// Police station.
    #[validate(length(min = 1, message = "police station is required"))]
    pub police_station: String,
    /// Requested role.
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}
