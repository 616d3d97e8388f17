//! Approval queue handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::auth::{approve_user as do_approve, list_pending, reject_user as do_reject};
use crate::auth::TokenPurpose;
use crate::db::UserRepository;
use crate::web::dto::{MessageResponse, UserResponse};
use crate::web::error::ApiError;

use super::AppState;

/// GET /api/auth/pending-users - Registrations awaiting review.
pub async fn pending_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = list_pending(state.db.pool()).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/auth/approve-user/:id - Approve a registration.
pub async fn approve_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    do_approve(state.db.pool(), &state.notifier, id).await?;
    Ok(Json(MessageResponse::new("User approved successfully")))
}

/// POST /api/auth/reject-user/:id - Reject a registration.
pub async fn reject_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    do_reject(state.db.pool(), &state.notifier, id).await?;
    Ok(Json(MessageResponse::new("User rejected successfully")))
}

/// GET /api/auth/review/:token - Resolve an approval-link token.
///
/// Backend half of the emailed review link: verifies the token (approval
/// purpose only) and returns the registration under review.
pub async fn review_registration(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let claims = state.tokens.verify(&token, TokenPurpose::Approval)?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(user.into()))
}
