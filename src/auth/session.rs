//! Session issuance for custodia.
//!
//! Validates credentials and approval status, then issues a
//! session-purpose bearer token.

use tracing::{info, warn};

use crate::auth::token::{TokenIssuer, TokenPurpose};
use crate::auth::verify_password;
use crate::db::{DbPool, User, UserRepository};
use crate::{CustodiaError, Result};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed session token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Authenticate a user and issue a session token.
///
/// Unknown email and wrong password produce the identical error message,
/// so the endpoint is not an account-existence oracle. An unapproved
/// account gets a distinct message: identity is already proven at that
/// point.
pub async fn login(
    pool: &DbPool,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
) -> Result<LoginOutcome> {
    let repo = UserRepository::new(pool);

    let user = match repo.find_by_email(email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "Login failed: unknown email");
            return Err(CustodiaError::Auth("invalid credentials".to_string()));
        }
    };

    if verify_password(password, &user.password).is_err() {
        warn!(email = %email, "Login failed: wrong password");
        return Err(CustodiaError::Auth("invalid credentials".to_string()));
    }

    if !user.is_approved() {
        warn!(email = %email, status = %user.status, "Login refused: account not approved");
        return Err(CustodiaError::Auth(
            "your account is pending approval".to_string(),
        ));
    }

    let token = tokens.issue(user.id, TokenPurpose::Session)?;

    // Stamping the login time is bookkeeping, not part of the contract
    if let Err(e) = repo.update_last_login(user.id).await {
        warn!(user_id = user.id, error = %e, "Failed to stamp last login");
    }

    info!(email = %user.email, user_id = user.id, "Login successful");

    Ok(LoginOutcome { token, user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::registration::{register_admin, register_officer, SignupRequest};
    use crate::db::{Database, Role, Status};
    use crate::notify::{ApprovalNotifier, RecordingMailer};
    use std::sync::Arc;

    async fn seeded_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        let notifier = ApprovalNotifier::new(
            Arc::new(RecordingMailer::default()),
            TokenIssuer::new("test-secret"),
            "http://localhost:5173",
            "ops@example.org",
        );

        register_admin(
            db.pool(),
            &SignupRequest::new("Ada Admin", "ada@example.com", "password123", "Central Station"),
        )
        .await
        .unwrap();

        register_officer(
            db.pool(),
            &notifier,
            &SignupRequest::new("Jo Officer", "jo@example.com", "password123", "Central Station")
                .with_role(Role::ForensicExpert),
        )
        .await
        .unwrap();

        db
    }

    #[tokio::test]
    async fn test_login_success() {
        let db = seeded_db().await;
        let tokens = TokenIssuer::new("test-secret");

        let outcome = login(db.pool(), &tokens, "ada@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(outcome.user.email, "ada@example.com");
        assert_eq!(outcome.user.role, Role::Admin);

        let claims = tokens
            .verify(&outcome.token, TokenPurpose::Session)
            .unwrap();
        assert_eq!(claims.sub, outcome.user.id);
    }

    #[tokio::test]
    async fn test_login_unknown_and_wrong_password_same_message() {
        let db = seeded_db().await;
        let tokens = TokenIssuer::new("test-secret");

        let unknown = login(db.pool(), &tokens, "ghost@example.com", "password123")
            .await
            .unwrap_err();
        let wrong = login(db.pool(), &tokens, "ada@example.com", "wrong-password")
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), "invalid credentials");
    }

    #[tokio::test]
    async fn test_login_pending_distinct_message() {
        let db = seeded_db().await;
        let tokens = TokenIssuer::new("test-secret");

        let err = login(db.pool(), &tokens, "jo@example.com", "password123")
            .await
            .unwrap_err();

        assert!(matches!(err, CustodiaError::Auth(_)));
        assert_eq!(err.to_string(), "your account is pending approval");
    }

    #[tokio::test]
    async fn test_login_rejected_account_refused() {
        let db = seeded_db().await;
        let tokens = TokenIssuer::new("test-secret");
        let repo = UserRepository::new(db.pool());

        let jo = repo.find_by_email("jo@example.com").await.unwrap().unwrap();
        repo.update_status(jo.id, Status::Rejected).await.unwrap();

        let err = login(db.pool(), &tokens, "jo@example.com", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "your account is pending approval");
    }

    #[tokio::test]
    async fn test_login_stamps_last_login() {
        let db = seeded_db().await;
        let tokens = TokenIssuer::new("test-secret");
        let repo = UserRepository::new(db.pool());

        login(db.pool(), &tokens, "ada@example.com", "password123")
            .await
            .unwrap();

        let ada = repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert!(ada.last_login.is_some());
    }
}
