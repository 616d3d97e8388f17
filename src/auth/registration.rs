//! Registration workflows for custodia.
//!
//! Two entry points share one payload shape and diverge on approval:
//! station admins bootstrap themselves and are live immediately, every
//! other role lands in the pending queue and the station admin is
//! notified by mail.

use tracing::info;

use crate::auth::validation::validate_signup;
use crate::auth::{hash_password, PasswordError};
use crate::db::{DbPool, NewUser, Role, Status, User, UserRepository};
use crate::notify::ApprovalNotifier;
use crate::{CustodiaError, Result};

/// Signup request data, shared by both entry points.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Full name.
    pub name: String,
    /// Email address (account identity).
    pub email: String,
    /// Plain password (8-128 characters).
    pub password: String,
    /// Police station the account belongs to.
    pub police_station: String,
    /// Requested role. Ignored by admin signup, which always assigns Admin.
    pub role: Role,
}

impl SignupRequest {
    /// Create a new signup request.
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
            police_station: police_station.into(),
            role: Role::Other,
        }
    }

    /// Set the requested role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Map a store-level uniqueness violation to the workflow error.
///
/// The pre-insert existence checks give friendly errors in the common
/// case; the unique indexes are the authority under concurrency.
fn map_unique_violation(err: CustodiaError) -> CustodiaError {
    if let CustodiaError::Database(msg) = &err {
        if msg.contains("UNIQUE") && msg.contains("users.police_station") {
            return CustodiaError::Conflict(
                "an admin already exists for this police station".to_string(),
            );
        }
        if msg.contains("UNIQUE") && msg.contains("users.email") {
            return CustodiaError::Conflict(
                "an account with this email already exists".to_string(),
            );
        }
    }
    err
}

fn hash_for_storage(password: &str) -> Result<String> {
    hash_password(password).map_err(|e: PasswordError| CustodiaError::Validation(e.to_string()))
}

/// Register a station admin.
///
/// This function:
/// 1. Validates all input fields
/// 2. Checks that the station has no admin yet
/// 3. Hashes the password
/// 4. Creates the user directly in approved status
///
/// No token is issued; the admin logs in separately.
pub async fn register_admin(pool: &DbPool, request: &SignupRequest) -> Result<User> {
    // 1. Validate all fields
    validate_signup(
        &request.name,
        &request.email,
        &request.password,
        &request.police_station,
    )
    .map_err(|e| CustodiaError::Validation(e.to_string()))?;

    let repo = UserRepository::new(pool);

    // 2. One admin per station
    if repo
        .find_station_admin(&request.police_station)
        .await?
        .is_some()
    {
        return Err(CustodiaError::Conflict(
            "an admin already exists for this police station".to_string(),
        ));
    }

    // 3. Hash the password
    let password_hash = hash_for_storage(&request.password)?;

    // 4. Create the user, pre-approved
    let new_user = NewUser::new(
        &request.name,
        &request.email,
        password_hash,
        &request.police_station,
    )
    .with_role(Role::Admin)
    .with_status(Status::Approved);

    let user = repo.create(&new_user).await.map_err(map_unique_violation)?;

    info!(
        email = %user.email,
        station = %user.police_station,
        user_id = user.id,
        "Station admin registered"
    );

    Ok(user)
}

/// Register an officer, expert or generic user.
///
/// This function:
/// 1. Validates all input fields (the admin role is rejected here)
/// 2. Requires an admin to exist for the station
/// 3. Hashes the password
/// 4. Creates the user in pending status and mails the station admin a
///    review link
///
/// The insert and the notification stand or fall together: the record is
/// only committed once the mail has been handed to the transport, so a
/// failed notification never leaves an orphaned pending account behind.
pub async fn register_officer(
    pool: &DbPool,
    notifier: &ApprovalNotifier,
    request: &SignupRequest,
) -> Result<User> {
    // 1. Validate all fields
    validate_signup(
        &request.name,
        &request.email,
        &request.password,
        &request.police_station,
    )
    .map_err(|e| CustodiaError::Validation(e.to_string()))?;

    // Auto-approved roles must use the admin entry point; the pending
    // queue is for everyone else
    if request.role.is_auto_approved() {
        return Err(CustodiaError::Validation(
            "admin accounts must register through the admin signup".to_string(),
        ));
    }

    let repo = UserRepository::new(pool);

    // 2. An admin must exist to review the registration
    let admin = repo
        .find_station_admin(&request.police_station)
        .await?
        .ok_or_else(|| {
            CustodiaError::Precondition("no admin found for this police station".to_string())
        })?;
    let recipient = notifier.recipient_for_admin(Some(&admin));

    // 3. Hash the password
    let password_hash = hash_for_storage(&request.password)?;

    // 4. Insert and notify inside one transaction
    let new_user = NewUser::new(
        &request.name,
        &request.email,
        password_hash,
        &request.police_station,
    )
    .with_role(request.role)
    .with_status(Status::Pending);

    let mut tx = pool.begin().await?;

    let user = UserRepository::create_with(&mut tx, &new_user)
        .await
        .map_err(map_unique_violation)?;

    // A failure here drops the transaction and rolls the insert back
    notifier.notify_admin_of_signup(&recipient, &user).await?;

    tx.commit().await?;

    info!(
        email = %user.email,
        role = %user.role,
        station = %user.police_station,
        user_id = user.id,
        "Registration pending approval"
    );

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenIssuer;
    use crate::db::Database;
    use crate::notify::{FailingMailer, RecordingMailer};
    use std::sync::Arc;

    fn notifier_with(mailer: Arc<dyn crate::notify::Mailer>) -> ApprovalNotifier {
        ApprovalNotifier::new(
            mailer,
            TokenIssuer::new("test-secret"),
            "http://localhost:5173",
            "ops@example.org",
        )
    }

    fn admin_request(station: &str, email: &str) -> SignupRequest {
        SignupRequest::new("Ada Admin", email, "password123", station)
    }

    fn officer_request(station: &str, email: &str) -> SignupRequest {
        SignupRequest::new("Jo Officer", email, "password123", station)
            .with_role(Role::InvestigationOfficer)
    }

    #[tokio::test]
    async fn test_register_admin_success() {
        let db = Database::open_in_memory().await.unwrap();

        let user = register_admin(db.pool(), &admin_request("Central Station", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.status, Status::Approved);
        assert_ne!(user.password, "password123");
        assert!(user.password.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_admin_duplicate_station() {
        let db = Database::open_in_memory().await.unwrap();

        register_admin(db.pool(), &admin_request("Central Station", "ada@example.com"))
            .await
            .unwrap();

        let result = register_admin(
            db.pool(),
            &admin_request("Central Station", "bob@example.com"),
        )
        .await;

        assert!(matches!(result, Err(CustodiaError::Conflict(_))));

        // No second record was created
        let repo = UserRepository::new(db.pool());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_admin_second_station_ok() {
        let db = Database::open_in_memory().await.unwrap();

        register_admin(db.pool(), &admin_request("Central Station", "ada@example.com"))
            .await
            .unwrap();
        register_admin(db.pool(), &admin_request("North Station", "bob@example.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_admin_invalid_payload() {
        let db = Database::open_in_memory().await.unwrap();

        let result = register_admin(
            db.pool(),
            &SignupRequest::new("Ada", "not-an-email", "password123", "Central Station"),
        )
        .await;
        assert!(matches!(result, Err(CustodiaError::Validation(_))));

        let result = register_admin(
            db.pool(),
            &SignupRequest::new("Ada", "ada@example.com", "short", "Central Station"),
        )
        .await;
        assert!(matches!(result, Err(CustodiaError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_officer_requires_admin() {
        let db = Database::open_in_memory().await.unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = notifier_with(mailer.clone());

        let result = register_officer(
            db.pool(),
            &notifier,
            &officer_request("Central Station", "jo@example.com"),
        )
        .await;

        assert!(matches!(result, Err(CustodiaError::Precondition(_))));

        // Nothing persisted, nothing sent
        let repo = UserRepository::new(db.pool());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_register_officer_success_notifies_admin() {
        let db = Database::open_in_memory().await.unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = notifier_with(mailer.clone());

        register_admin(db.pool(), &admin_request("Central Station", "ada@example.com"))
            .await
            .unwrap();

        let user = register_officer(
            db.pool(),
            &notifier,
            &officer_request("Central Station", "jo@example.com"),
        )
        .await
        .unwrap();

        assert_eq!(user.status, Status::Pending);
        assert_eq!(user.role, Role::InvestigationOfficer);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@example.com");
        assert!(sent[0].text.contains("jo@example.com"));
        assert!(sent[0].text.contains("/approve-user/"));
    }

    #[tokio::test]
    async fn test_register_officer_rejects_admin_role() {
        let db = Database::open_in_memory().await.unwrap();
        let notifier = notifier_with(Arc::new(RecordingMailer::default()));

        register_admin(db.pool(), &admin_request("Central Station", "ada@example.com"))
            .await
            .unwrap();

        let result = register_officer(
            db.pool(),
            &notifier,
            &officer_request("Central Station", "mal@example.com").with_role(Role::Admin),
        )
        .await;

        assert!(matches!(result, Err(CustodiaError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_officer_rolls_back_on_send_failure() {
        let db = Database::open_in_memory().await.unwrap();
        let notifier = notifier_with(Arc::new(FailingMailer));

        register_admin(db.pool(), &admin_request("Central Station", "ada@example.com"))
            .await
            .unwrap();

        let result = register_officer(
            db.pool(),
            &notifier,
            &officer_request("Central Station", "jo@example.com"),
        )
        .await;

        assert!(matches!(result, Err(CustodiaError::Notification(_))));

        // The pending record was rolled back with the failed send
        let repo = UserRepository::new(db.pool());
        assert!(repo
            .find_by_email("jo@example.com")
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_officer_duplicate_email() {
        let db = Database::open_in_memory().await.unwrap();
        let notifier = notifier_with(Arc::new(RecordingMailer::default()));

        register_admin(db.pool(), &admin_request("Central Station", "ada@example.com"))
            .await
            .unwrap();
        register_officer(
            db.pool(),
            &notifier,
            &officer_request("Central Station", "jo@example.com"),
        )
        .await
        .unwrap();

        let result = register_officer(
            db.pool(),
            &notifier,
            &officer_request("Central Station", "jo@example.com"),
        )
        .await;

        assert!(matches!(result, Err(CustodiaError::Conflict(_))));
    }
}
