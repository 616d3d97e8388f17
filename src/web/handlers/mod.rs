//! Request handlers for the web API.

mod admin;
mod auth;

pub use admin::{approve_user, pending_users, reject_user, review_registration};
pub use auth::{login, me, signup_admin, signup_officer};

use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::db::Database;
use crate::notify::ApprovalNotifier;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Token issuer for sessions and approval links.
    pub tokens: TokenIssuer,
    /// Notification builder and sender.
    pub notifier: Arc<ApprovalNotifier>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Arc<Database>, tokens: TokenIssuer, notifier: Arc<ApprovalNotifier>) -> Self {
        Self {
            db,
            tokens,
            notifier,
        }
    }
}
