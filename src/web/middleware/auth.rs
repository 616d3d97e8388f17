//! Bearer token authentication middleware.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{TokenClaims, TokenIssuer, TokenPurpose};
use crate::web::error::ApiError;

/// Extractor for authenticated users.
///
/// Requires a `Bearer` token minted for session use; approval-link
/// tokens are rejected here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|header| header.strip_prefix("Bearer "))
                .ok_or_else(|| ApiError::unauthorized("missing authorization"))?;

            // Issuer is injected into extensions by the router middleware
            let issuer = parts
                .extensions
                .get::<Arc<TokenIssuer>>()
                .ok_or_else(|| ApiError::internal("token issuer not configured"))?;

            let claims = issuer.verify(token, TokenPurpose::Session)?;

            Ok(AuthUser(claims))
        })
    }
}

/// Middleware function to inject the token issuer into request extensions.
pub async fn token_auth(
    issuer: Arc<TokenIssuer>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(issuer);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    fn parts_with(token: Option<&str>, issuer: Option<Arc<TokenIssuer>>) -> Parts {
        let mut builder = HttpRequest::builder().uri("/api/auth/me");
        if let Some(t) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {t}"));
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        if let Some(i) = issuer {
            parts.extensions.insert(i);
        }
        parts
    }

    #[tokio::test]
    async fn test_extractor_accepts_session_token() {
        let issuer = Arc::new(TokenIssuer::new("test-secret"));
        let token = issuer.issue(5, TokenPurpose::Session).unwrap();

        let mut parts = parts_with(Some(&token), Some(issuer));
        let AuthUser(claims) = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(claims.sub, 5);
    }

    #[tokio::test]
    async fn test_extractor_rejects_approval_token() {
        let issuer = Arc::new(TokenIssuer::new("test-secret"));
        let token = issuer.issue(5, TokenPurpose::Approval).unwrap();

        let mut parts = parts_with(Some(&token), Some(issuer));
        let result = AuthUser::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_header() {
        let issuer = Arc::new(TokenIssuer::new("test-secret"));

        let mut parts = parts_with(None, Some(issuer));
        let result = AuthUser::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extractor_rejects_garbage_token() {
        let issuer = Arc::new(TokenIssuer::new("test-secret"));

        let mut parts = parts_with(Some("garbage"), Some(issuer));
        let result = AuthUser::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }
}
