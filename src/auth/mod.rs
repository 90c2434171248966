// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Signed bearer tokens and per-request identity resolution.
//!
//! ## Auth Flow
//!
//! 1. A token is issued for a registered user's [`UserId`]
//!    ([`TokenCodec::issue`]).
//! 2. The client sends `Authorization: Bearer <token>` with every request.
//! 3. The [`Auth`] extractor:
//!    - verifies the HS256 signature and the expiry
//!    - resolves the subject against the user directory
//!    - rejects with a uniform 401 on any failure
//! 4. Handlers pass the resolved `UserId` explicitly into service calls.
//!
//! ## Security
//!
//! - All `/api` endpoints require authentication
//! - The signing secret is injected at start-up and never mutated
//! - Rotating the secret invalidates every issued token
//! - No clock skew leeway is applied to expiry

pub mod claims;
pub mod error;
pub mod extractor;
pub mod resolver;
pub mod token;

pub use claims::{UserId, VerifiedToken};
pub use error::AuthError;
pub use extractor::Auth;
pub use resolver::{AuthResult, IdentityResolver};
pub use token::{IssuedToken, ParsedToken, SigningSecret, TokenCodec, TokenConfig, TokenError};
