// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! The variants record why a credential was refused so the reason can be
//! logged. Callers never see it: every credential failure renders the same
//! 401 body, which keeps the endpoint from acting as a token-validity oracle.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message returned for every rejected credential.
pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthorized. User must be logged in.";

/// Authentication error type.
#[derive(Debug)]
pub enum AuthError {
    /// No credential presented
    MissingCredential,
    /// Authorization header present but not `Bearer <token>`
    InvalidAuthHeader,
    /// Token is not a decodable JWT for this service
    MalformedToken,
    /// Token signature does not verify
    InvalidSignature,
    /// Token signature verifies but `exp` has passed
    TokenExpired,
    /// Token subject does not resolve to a known user
    UnknownUser,
    /// User directory lookup failed
    DirectoryUnavailable(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Internal reason code, used in logs only.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::UnknownUser => "unknown_user",
            AuthError::DirectoryUnavailable(_) => "directory_unavailable",
        }
    }

    /// Error code exposed to the caller.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DirectoryUnavailable(_) => "internal_error",
            _ => "unauthenticated",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DirectoryUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AuthError::DirectoryUnavailable(_) => "Internal authentication error",
            _ => UNAUTHENTICATED_MESSAGE,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "No bearer credential presented"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::InvalidSignature => write!(f, "Token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::UnknownUser => write!(f, "Token subject is not a known user"),
            AuthError::DirectoryUnavailable(msg) => write!(f, "User directory unavailable: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.public_message().to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: AuthError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn credential_failures_render_identical_401() {
        let (_, reference) = body_of(AuthError::MissingCredential).await;
        assert_eq!(reference["error_code"], "unauthenticated");
        assert_eq!(reference["error"], UNAUTHENTICATED_MESSAGE);

        for error in [
            AuthError::InvalidAuthHeader,
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::TokenExpired,
            AuthError::UnknownUser,
        ] {
            let (status, body) = body_of(error).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, reference);
        }
    }

    #[tokio::test]
    async fn directory_failure_returns_500_without_detail() {
        let (status, body) = body_of(AuthError::DirectoryUnavailable("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error_code"], "internal_error");
        assert!(!body["error"].as_str().unwrap().contains("poisoned"));
    }

    #[test]
    fn reasons_are_distinct_for_logging() {
        assert_eq!(AuthError::TokenExpired.reason(), "token_expired");
        assert_eq!(AuthError::InvalidSignature.reason(), "invalid_signature");
        assert_eq!(AuthError::UnknownUser.reason(), "unknown_user");
    }
}
