// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for all resource operations.
//!
//! A resource is visible and mutable only through the identity that created
//! it. A mismatch is reported exactly like a missing resource, so a caller
//! cannot tell "not mine" from "does not exist".

use uuid::Uuid;

use crate::auth::UserId;

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Collection name, used for storage layout and logs.
    const KIND: &'static str;

    /// Resource identifier.
    fn id(&self) -> Uuid;

    /// Identity that created the resource.
    fn owner(&self) -> &UserId;

    /// Text fields searched by keyword filters.
    fn search_fields(&self) -> Vec<&str>;
}

/// Outcome of the ownership guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    DenyAsNotFound,
}

/// Decide whether `caller` may touch a resource owned by `owner`.
pub fn guard(caller: &UserId, owner: &UserId) -> Access {
    if caller == owner {
        Access::Allow
    } else {
        Access::DenyAsNotFound
    }
}

/// Normalise a search keyword. Blank or absent means "no filter".
pub fn normalize_keyword(keyword: Option<&str>) -> Option<String> {
    keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive substring match over the resource's search fields.
pub fn matches_keyword<T: OwnedResource>(resource: &T, keyword: Option<&str>) -> bool {
    match normalize_keyword(keyword) {
        None => true,
        Some(needle) => resource
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle)),
    }
}

/// Whether a stored resource belongs in `list_by_owner(owner, keyword)`.
pub fn visible_in_listing<T: OwnedResource>(
    resource: &T,
    owner: &UserId,
    keyword: Option<&str>,
) -> bool {
    guard(owner, resource.owner()) == Access::Allow && matches_keyword(resource, keyword)
}

/// Extension trait applying the guard to a lookup result.
pub trait OwnershipCheck<T> {
    /// Keep the resource only if `caller` owns it.
    fn owned_by(self, caller: &UserId) -> Option<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn owned_by(self, caller: &UserId) -> Option<T> {
        self.filter(|resource| guard(caller, resource.owner()) == Access::Allow)
    }
}
