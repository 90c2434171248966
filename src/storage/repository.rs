// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persistence contract for owned resources.

use uuid::Uuid;

use crate::auth::UserId;

use super::{OwnedResource, StorageResult};

/// Per-kind repository consumed by the resource services.
///
/// Lookups take the owner as well as the id; implementations must not return
/// a resource owned by anyone else. Services apply the ownership guard again
/// on whatever comes back.
pub trait OwnedRepository<T: OwnedResource>: Send + Sync {
    /// Resource with `id` if it is owned by `owner`.
    fn find_by_owner_and_id(&self, owner: &UserId, id: Uuid) -> StorageResult<Option<T>>;

    /// Whether a resource with `id` owned by `owner` exists.
    fn exists_by_owner_and_id(&self, owner: &UserId, id: Uuid) -> StorageResult<bool>;

    /// All resources of `owner`, narrowed by a normalised keyword.
    fn list_by_owner(&self, owner: &UserId, keyword: Option<&str>) -> StorageResult<Vec<T>>;

    /// Insert or replace.
    fn save(&self, resource: T) -> StorageResult<T>;

    /// Remove by id. Removing a missing id is not an error.
    fn delete_by_id(&self, id: Uuid) -> StorageResult<()>;
}
