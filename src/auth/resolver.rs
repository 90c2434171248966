// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request identity resolution.
//!
//! An [`IdentityResolver`] borrows the shared codec and user directory for
//! the duration of one request and turns an optional bearer credential into
//! an [`AuthResult`]. It holds no state of its own.

use crate::storage::{UserDirectory, UserProfile};

use super::{AuthError, ParsedToken, TokenCodec, UserId};

/// Request-scoped authentication outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Authenticated { identity: UserId, user: UserProfile },
    Unauthenticated,
}

impl AuthResult {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthResult::Authenticated { .. })
    }

    /// Resolved user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthResult::Authenticated { user, .. } => Some(user),
            AuthResult::Unauthenticated => None,
        }
    }

    /// Resolved user.
    ///
    /// # Panics
    ///
    /// When the request is unauthenticated. Gate on
    /// [`AuthResult::is_authenticated`] first.
    pub fn current_user(&self) -> &UserProfile {
        match self {
            AuthResult::Authenticated { user, .. } => user,
            AuthResult::Unauthenticated => {
                panic!("current_user() called on an unauthenticated request")
            }
        }
    }
}

pub struct IdentityResolver<'a> {
    codec: &'a TokenCodec,
    users: &'a dyn UserDirectory,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(codec: &'a TokenCodec, users: &'a dyn UserDirectory) -> Self {
        Self { codec, users }
    }

    /// Resolve a credential to an [`AuthResult`].
    ///
    /// Every failure, including a directory error, yields `Unauthenticated`.
    pub fn resolve(&self, credential: Option<&str>) -> AuthResult {
        match self.authenticate(credential) {
            Ok(user) => AuthResult::Authenticated {
                identity: user.id,
                user,
            },
            Err(_) => AuthResult::Unauthenticated,
        }
    }

    /// Same decision as [`IdentityResolver::resolve`], keeping the reason.
    ///
    /// The credential is decoded and verified once; freshness and identity
    /// both come from that single [`ParsedToken`].
    pub fn authenticate(&self, credential: Option<&str>) -> Result<UserProfile, AuthError> {
        let credential = credential.ok_or(AuthError::MissingCredential)?;

        let identity = match self.codec.parse(credential) {
            ParsedToken::Valid(token) => token.subject,
            ParsedToken::Expired(_) => return Err(AuthError::TokenExpired),
            ParsedToken::SignatureInvalid => return Err(AuthError::InvalidSignature),
            ParsedToken::Malformed => return Err(AuthError::MalformedToken),
        };

        self.users
            .find_by_id(&identity)
            .map_err(|e| AuthError::DirectoryUnavailable(e.to_string()))?
            .ok_or(AuthError::UnknownUser)
    }
}
