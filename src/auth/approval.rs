//! Approval workflow for custodia.
//!
//! Transitions pending accounts to their terminal status and sends the
//! courtesy mail for each outcome. The status update is a single atomic
//! statement; mail delivery never rolls it back.

use tracing::{info, warn};

use crate::db::{DbPool, Status, User, UserRepository};
use crate::notify::ApprovalNotifier;
use crate::{CustodiaError, Result};

async fn transition(
    pool: &DbPool,
    notifier: &ApprovalNotifier,
    user_id: i64,
    outcome: Status,
) -> Result<User> {
    let repo = UserRepository::new(pool);

    let user = repo
        .update_status(user_id, outcome)
        .await?
        .ok_or_else(|| CustodiaError::NotFound("user".to_string()))?;

    info!(
        email = %user.email,
        user_id = user.id,
        status = %outcome,
        "Registration reviewed"
    );

    // Best-effort: the transition is already committed
    if let Err(e) = notifier.notify_applicant(&user, outcome).await {
        warn!(
            email = %user.email,
            error = %e,
            "Failed to send review outcome notification"
        );
    }

    Ok(user)
}

/// Approve a pending registration.
///
/// Returns the updated user, or `NotFound` for an unknown id. Approving
/// an already-approved user re-asserts the status and succeeds.
pub async fn approve_user(
    pool: &DbPool,
    notifier: &ApprovalNotifier,
    user_id: i64,
) -> Result<User> {
    transition(pool, notifier, user_id, Status::Approved).await
}

/// Reject a pending registration.
pub async fn reject_user(pool: &DbPool, notifier: &ApprovalNotifier, user_id: i64) -> Result<User> {
    transition(pool, notifier, user_id, Status::Rejected).await
}

/// List all registrations awaiting review, in store order.
pub async fn list_pending(pool: &DbPool) -> Result<Vec<User>> {
    UserRepository::new(pool).list_by_status(Status::Pending).await
}
