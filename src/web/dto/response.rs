//! Response DTOs for the web API.

use serde::Serialize;

use crate::db::{Role, Status, User};

/// Simple confirmation response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Create a confirmation response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response: the bearer token plus what the client needs for
/// display and role gating.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed session token.
    pub token: String,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// User role.
    pub role: Role,
}

/// User record in responses. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// User role.
    pub role: Role,
    /// Police station.
    pub police_station: String,
    /// Approval status.
    pub status: Status,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            police_station: user.police_station,
            status: user.status,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}
