//! Router configuration for the web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    approve_user, login, me, pending_users, reject_user, review_registration, signup_admin,
    signup_officer, AppState,
};
use super::middleware::{create_cors_layer, token_auth};
use crate::auth::TokenIssuer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/signup/admin", post(signup_admin))
        .route("/signup/officer", post(signup_officer))
        .route("/login", post(login))
        .route("/pending-users", get(pending_users))
        .route("/approve-user/:id", post(approve_user))
        .route("/reject-user/:id", post(reject_user))
        .route("/review/:token", get(review_registration))
        .route("/me", get(me));

    let api_routes = Router::new().nest("/auth", auth_routes);

    // Clone the issuer for the middleware closure
    let issuer: Arc<TokenIssuer> = Arc::new(app_state.tokens.clone());

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let issuer = issuer.clone();
                    token_auth(issuer, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
