//! custodia - Digital evidence management backend.
//!
//! Registration, approval and authentication service: officers register
//! under a police station, station admins review them via emailed links,
//! and approved users log in with a bearer token.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod notify;
pub mod web;

pub use auth::{
    approve_user, hash_password, list_pending, login, register_admin, register_officer,
    reject_user, verify_password, LoginOutcome, PasswordError, SignupRequest, TokenClaims,
    TokenIssuer, TokenPurpose, ValidationError,
};
pub use config::Config;
pub use db::{Database, DbPool, NewUser, Role, Status, User, UserRepository};
pub use error::{CustodiaError, Result};
pub use notify::{ApprovalNotifier, Mailer, OutgoingMail};
pub use web::WebServer;
