//! User model for custodia.
//!
//! Defines the User struct together with the Role and Status enums that
//! drive the registration and approval workflows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// User role.
///
/// A closed set: role strings from the outside are parsed with `FromStr`
/// and unknown values are rejected, so a misspelled role can never slip
/// past the approval gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Station administrator; reviews registrations.
    Admin,
    /// Investigation officer.
    InvestigationOfficer,
    /// Forensic expert.
    ForensicExpert,
    /// Generic user.
    #[default]
    #[serde(rename = "user")]
    Other,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::InvestigationOfficer => "investigation-officer",
            Role::ForensicExpert => "forensic-expert",
            Role::Other => "user",
        }
    }

    /// Human-readable name, used in notification mail.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::InvestigationOfficer => "Investigation Officer",
            Role::ForensicExpert => "Forensic Expert",
            Role::Other => "User",
        }
    }

    /// Whether this role is created pre-approved.
    pub fn is_auto_approved(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "investigation-officer" => Ok(Role::InvestigationOfficer),
            "forensic-expert" => Ok(Role::ForensicExpert),
            "user" => Ok(Role::Other),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// Account approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Awaiting admin review.
    #[default]
    Pending,
    /// Approved; may log in.
    Approved,
    /// Rejected; terminal.
    Rejected,
}

impl Status {
    /// Convert status to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "approved" => Ok(Status::Approved),
            "rejected" => Ok(Status::Rejected),
            _ => Err(format!("unknown status: {s}")),
        }
    }
}

/// User entity representing a registered account.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address (unique, case-insensitive).
    pub email: String,
    /// Password hash (Argon2).
    pub password: String,
    /// User role.
    pub role: Role,
    /// Police station this account belongs to.
    pub police_station: String,
    /// Approval status.
    pub status: Status,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp (optional).
    pub last_login: Option<String>,
}

impl User {
    /// Whether this user may log in.
    pub fn is_approved(&self) -> bool {
        self.status == Status::Approved
    }

    /// Whether this user is a station admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        let status: String = row.try_get("status")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            role: role.parse().map_err(|e: String| sqlx::Error::ColumnDecode {
                index: "role".into(),
                source: e.into(),
            })?,
            police_station: row.try_get("police_station")?,
            status: status
                .parse()
                .map_err(|e: String| sqlx::Error::ColumnDecode {
                    index: "status".into(),
                    source: e.into(),
                })?,
            created_at: row.try_get("created_at")?,
            last_login: row.try_get("last_login")?,
        })
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
    /// User role (defaults to Other).
    pub role: Role,
    /// Police station.
    pub police_station: String,
    /// Initial approval status (defaults to Pending).
    pub status: Status,
}

impl NewUser {
    /// Create a new user with minimal required fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        police_station: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: Role::Other,
            police_station: police_station.into(),
            status: Status::Pending,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the initial status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}
