// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token codec.
//!
//! Tokens are compact HS256 JWTs (`header.claims.signature`, base64url)
//! carrying `sub`, `iat` and `exp`. The signature covers the header and all
//! claims, so no field can change without invalidating the token.
//!
//! ## Parsing outcomes
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Valid` | signature verifies, `now <= exp` |
//! | `Expired` | signature verifies, `now > exp` |
//! | `Malformed` | not a decodable HS256 JWT, or `sub` is not a UUID |
//! | `SignatureInvalid` | decodable, but signed with another key or tampered |
//!
//! Expiry is evaluated by the codec rather than by `jsonwebtoken` so that an
//! expired token still yields its verified claims. [`TokenCodec::validate`]
//! is the freshness gate; [`TokenCodec::extract_identity`] deliberately
//! ignores freshness.

use std::fmt;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::claims::{TokenClaims, UserId, VerifiedToken};

/// Minimum signing secret length (256 bits).
pub const MIN_SECRET_LEN: usize = 32;

/// Default token lifetime.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Longest accepted token lifetime (ten years).
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 24 * 365 * 10;

/// Only algorithm accepted or produced by the codec.
const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Errors raised while building a codec or issuing a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret must be at least {MIN_SECRET_LEN} bytes, got {0}")]
    WeakSecret(usize),

    #[error("token lifetime must be positive")]
    InvalidLifetime,

    #[error("token lifetime must not exceed {MAX_TOKEN_LIFETIME_HOURS} hours")]
    LifetimeTooLong,

    #[error("token expiry is outside the representable time range")]
    ExpiryOutOfRange,

    #[error("failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Server-held HMAC key. Never printed.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret(bytes.len()));
        }
        Ok(Self(bytes))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret(<{} bytes redacted>)", self.0.len())
    }
}

/// Codec configuration, loaded once at start-up.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: SigningSecret,
    pub lifetime: Duration,
}

impl TokenConfig {
    pub fn new(secret: SigningSecret, lifetime: Duration) -> Result<Self, TokenError> {
        if lifetime <= Duration::zero() {
            return Err(TokenError::InvalidLifetime);
        }
        if lifetime > Duration::hours(MAX_TOKEN_LIFETIME_HOURS) {
            return Err(TokenError::LifetimeTooLong);
        }
        Ok(Self { secret, lifetime })
    }
}

/// A freshly issued token together with the claims it encodes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssuedToken {
    /// Compact bearer token text.
    pub token: String,
    /// Identity the token was issued for.
    pub subject: UserId,
    /// Issue time (second precision, as encoded).
    pub issued_at: DateTime<Utc>,
    /// Expiry time (second precision, as encoded).
    pub expires_at: DateTime<Utc>,
}

/// Result of parsing presented token text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedToken {
    Valid(VerifiedToken),
    Expired(VerifiedToken),
    Malformed,
    SignatureInvalid,
}

impl ParsedToken {
    /// Verified claims regardless of freshness.
    pub fn verified(&self) -> Option<&VerifiedToken> {
        match self {
            ParsedToken::Valid(token) | ParsedToken::Expired(token) => Some(token),
            ParsedToken::Malformed | ParsedToken::SignatureInvalid => None,
        }
    }
}

/// Issues and verifies bearer tokens.
///
/// Holds only the immutable key material, so a single instance can be shared
/// across all requests behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        let secret = config.secret.as_bytes();

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is judged in `parse_at` so expired claims stay readable.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime: config.lifetime,
        }
    }

    /// Configured token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `subject` valid from now for the configured lifetime.
    pub fn issue(&self, subject: UserId) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, subject: UserId, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(self.lifetime)
            .ok_or(TokenError::ExpiryOutOfRange)?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            token,
            subject,
            issued_at,
            expires_at,
        })
    }

    /// Parse token text against the current time.
    pub fn parse(&self, text: &str) -> ParsedToken {
        self.parse_at(text, Utc::now())
    }

    /// Parse token text as if the current time were `now`.
    pub fn parse_at(&self, text: &str, now: DateTime<Utc>) -> ParsedToken {
        let data = match decode::<TokenClaims>(text, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::InvalidSignature => ParsedToken::SignatureInvalid,
                    _ => ParsedToken::Malformed,
                }
            }
        };

        let Some(verified) = VerifiedToken::from_claims(&data.claims) else {
            return ParsedToken::Malformed;
        };

        if verified.is_expired_at(now) {
            ParsedToken::Expired(verified)
        } else {
            ParsedToken::Valid(verified)
        }
    }

    /// Freshness-enforcing predicate.
    ///
    /// `Expired` passes only when `ignore_expiry` is set.
    pub fn validate(&self, text: &str, ignore_expiry: bool) -> bool {
        self.validate_at(text, ignore_expiry, Utc::now())
    }

    pub fn validate_at(&self, text: &str, ignore_expiry: bool, now: DateTime<Utc>) -> bool {
        match self.parse_at(text, now) {
            ParsedToken::Valid(_) => true,
            ParsedToken::Expired(_) => ignore_expiry,
            ParsedToken::Malformed | ParsedToken::SignatureInvalid => false,
        }
    }

    /// Subject of any signature-valid token, fresh or expired.
    ///
    /// This does not check expiry. Pair it with [`TokenCodec::validate`]
    /// before using the result for an authorization decision.
    pub fn extract_identity(&self, text: &str) -> Option<UserId> {
        self.parse(text).verified().map(|token| token.subject)
    }
}
