// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User directory.
//!
//! Registration is handled elsewhere; this service only needs to know
//! whether a token subject is a known user and what its profile is.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::UserId;

use super::StorageResult;

/// Profile of a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

/// Lookup of user profiles by identity.
pub trait UserDirectory: Send + Sync {
    fn find_by_id(&self, id: &UserId) -> StorageResult<Option<UserProfile>>;
}

#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserProfile>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a profile.
    pub fn insert(&self, profile: UserProfile) -> StorageResult<()> {
        let mut users = self.users.write()?;
        users.insert(profile.id, profile);
        Ok(())
    }
}

impl UserDirectory for MemoryUserDirectory {
    fn find_by_id(&self, id: &UserId) -> StorageResult<Option<UserProfile>> {
        let users = self.users.read()?;
        Ok(users.get(id).cloned())
    }
}
