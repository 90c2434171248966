// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is UserProfile; pass user.id into every service call
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{AuthError, IdentityResolver};
use crate::state::AppState;
use crate::storage::UserProfile;

/// Extractor for authenticated users.
///
/// Reads `Authorization: Bearer <token>`, verifies the token (signature and
/// expiry) and resolves the subject against the user directory. Any failure
/// rejects the request with the uniform 401 from [`AuthError`].
///
/// # Example
///
/// ```rust,ignore
/// async fn list_todos(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<TodoListResponse>, ApiError> {
///     let todos = state.todos.list(&user.id, None)?;
///     // ...
/// }
/// ```
pub struct Auth(pub UserProfile);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = bearer_credential(&parts.headers)?;

        let resolver = IdentityResolver::new(&state.tokens, state.users.as_ref());
        match resolver.authenticate(credential) {
            Ok(user) => Ok(Auth(user)),
            Err(e) => {
                match &e {
                    AuthError::DirectoryUnavailable(msg) => {
                        tracing::error!(error = %msg, "User directory lookup failed during authentication");
                    }
                    _ => {
                        tracing::debug!(reason = e.reason(), "Rejected bearer credential");
                    }
                }
                Err(e)
            }
        }
    }
}

/// Bearer token from the Authorization header.
///
/// `Ok(None)` when the header is absent; an error when it is present but not
/// of the form `Bearer <token>`.
pub fn bearer_credential(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)?;

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SigningSecret, TokenCodec, TokenConfig, UserId};
    use crate::storage::MemoryUserDirectory;
    use axum::http::Request;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn create_test_state() -> (AppState, UserProfile) {
        let config = TokenConfig::new(
            SigningSecret::new("extractor-secret-0123456789abcdef").unwrap(),
            Duration::hours(1),
        )
        .unwrap();
        let users = MemoryUserDirectory::new();
        let user = UserProfile::new(UserId::new_random(), "Ayu", "ayu@example.com");
        users.insert(user.clone()).unwrap();

        let state = AppState::in_memory(Arc::new(TokenCodec::new(&config)), Arc::new(users));
        (state, user)
    }

    fn parts_with(header: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_credential() {
        let (state, _) = create_test_state();
        let mut parts = parts_with(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_non_bearer_scheme() {
        let (state, _) = create_test_state();
        let mut parts = parts_with(Some("Basic dXNlcjpwYXNz".into()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_issued_token() {
        let (state, user) = create_test_state();
        let token = state.tokens.issue(user.id).unwrap().token;
        let mut parts = parts_with(Some(format!("Bearer {token}")));

        let Auth(resolved) = Auth::from_request_parts(&mut parts, &state)
            .await
            .expect("token authenticates");
        assert_eq!(resolved, user);
    }

    #[tokio::test]
    async fn auth_extractor_rejects_expired_token() {
        let (state, user) = create_test_state();
        let token = state
            .tokens
            .issue_at(user.id, Utc::now() - Duration::hours(2))
            .unwrap()
            .token;
        let mut parts = parts_with(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn bearer_credential_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_credential(&headers).unwrap(), None);

        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_credential(&headers).unwrap(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, "Bearer    ".parse().unwrap());
        assert!(matches!(
            bearer_credential(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));

        headers.insert(AUTHORIZATION, "bearer abc".parse().unwrap());
        assert!(matches!(
            bearer_credential(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));
    }
}
