//! Authentication and account lifecycle for custodia.
//!
//! Holds the password hasher, signup validation, the token issuer, and
//! the registration / approval / session workflows.

pub mod approval;
pub mod password;
pub mod registration;
pub mod session;
pub mod token;
pub mod validation;

pub use approval::{approve_user, list_pending, reject_user};
pub use password::{hash_password, verify_password, PasswordError};
pub use registration::{register_admin, register_officer, SignupRequest};
pub use session::{login, LoginOutcome};
pub use token::{TokenClaims, TokenIssuer, TokenPurpose, DEFAULT_TOKEN_TTL};
pub use validation::{validate_signup, ValidationError};
