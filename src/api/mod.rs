//! HTTP endpoints outside the native GraphQL route

pub mod health;
pub mod query;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::graphql::{Viewer, verify_token};

/// Extract bearer token from Authorization header
pub(crate) fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| h.starts_with("Bearer "))
        .map(|h| h[7..].to_string())
}

/// Viewer from request headers; verification failures fall back to anonymous
pub(crate) fn viewer_from_headers(headers: &HeaderMap, secret: &str) -> Option<Viewer> {
    let token = extract_token(headers)?;
    match verify_token(&token, secret) {
        Ok(viewer) => Some(viewer),
        Err(err) => {
            tracing::debug!(error = %err, "Token verification failed, treating viewer as anonymous");
            None
        }
    }
}
