//! Authentication middleware for API key validation.
//!
//! The service authenticates with a single API key supplied through
//! configuration. Only its SHA-256 hash is kept in memory, and the
//! comparison is constant-time.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use rdv_store::security;

/// Paths served without authentication.
const OPEN_PATHS: [&str; 2] = ["/health", "/api-docs/openapi.json"];

/// Auth state: the hash of the configured API key.
pub struct ApiKeyAuth {
    key_hash: String,
}

impl ApiKeyAuth {
    /// Creates auth state from the raw configured key.
    pub fn new(api_key: &str) -> Self {
        Self {
            key_hash: security::hash_api_key(api_key),
        }
    }

    fn verify(&self, candidate: &str) -> bool {
        security::verify_api_key(candidate, &self.key_hash)
    }
}

/// Extracts the API key from the Authorization header.
/// Expected format: "Bearer <api_key>" or just "<api_key>"
fn extract_api_key(auth_header: Option<&str>) -> Option<&str> {
    let header = auth_header?;
    match header.strip_prefix("Bearer ") {
        Some(key) => Some(key),
        None => Some(header),
    }
}

/// Authentication middleware.
///
/// Health, docs and the OpenAPI document stay open; everything else
/// requires the configured key in the Authorization header and gets 401
/// otherwise.
pub async fn auth_middleware(
    State(auth): State<Arc<ApiKeyAuth>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if OPEN_PATHS.contains(&path) || path.starts_with("/docs") {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let api_key = match extract_api_key(auth_header) {
        Some(key) if !key.is_empty() => key,
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    if auth.verify(api_key) {
        next.run(request).await
    } else {
        unauthorized_response("Invalid API key")
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": message,
            "code": 401
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_api_key_bearer() {
        assert_eq!(
            extract_api_key(Some("Bearer sk_rdv_123")),
            Some("sk_rdv_123")
        );
    }

    #[test]
    fn test_extract_api_key_raw() {
        assert_eq!(extract_api_key(Some("sk_rdv_123")), Some("sk_rdv_123"));
    }

    #[test]
    fn test_extract_api_key_none() {
        assert_eq!(extract_api_key(None), None);
    }

    #[test]
    fn test_verify_round_trip() {
        let auth = ApiKeyAuth::new("sk_rdv_123");
        assert!(auth.verify("sk_rdv_123"));
        assert!(!auth.verify("sk_rdv_456"));
    }
}
