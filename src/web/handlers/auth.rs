//! Signup and login handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::auth::{login as do_login, register_admin, register_officer, SignupRequest};
use crate::db::{Role, UserRepository};
use crate::web::dto::{
    AdminSignupRequest, LoginRequest, LoginResponse, MessageResponse, OfficerSignupRequest,
    UserResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// POST /api/auth/signup/admin - Station admin bootstrap.
pub async fn signup_admin(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdminSignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    req.validate().map_err(ApiError::from_validation_errors)?;

    let request = SignupRequest::new(req.name, req.email, req.password, req.police_station)
        .with_role(Role::Admin);

    register_admin(state.db.pool(), &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Admin registered successfully")),
    ))
}

/// POST /api/auth/signup/officer - Officer / expert signup.
pub async fn signup_officer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OfficerSignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    req.validate().map_err(ApiError::from_validation_errors)?;

    // Closed role set: unknown strings are a 400, not a silent default
    let role: Role = req
        .role
        .parse()
        .map_err(|e: String| ApiError::bad_request(e))?;

    let request = SignupRequest::new(req.name, req.email, req.password, req.police_station)
        .with_role(role);

    register_officer(state.db.pool(), &state.notifier, &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Registration successful. Waiting for admin approval",
        )),
    ))
}

/// POST /api/auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Empty fields fall through to the generic credential failure; the
    // endpoint never distinguishes why a login was refused
    let outcome = do_login(state.db.pool(), &state.tokens, &req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        name: outcome.user.name,
        email: outcome.user.email,
        role: outcome.user.role,
    }))
}

/// GET /api/auth/me - Current user info.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(user.into()))
}
