//! Middleware for the web API.

mod auth;
mod cors;

pub use auth::{token_auth, AuthUser};
pub use cors::create_cors_layer;
