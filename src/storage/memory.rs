// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory repository.
//!
//! Default backend when no `DATA_DIR` is configured. State lives for the
//! process lifetime only.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::auth::UserId;

use super::ownership::{guard, visible_in_listing, Access};
use super::{OwnedRepository, OwnedResource, StorageResult};

pub struct MemoryRepository<T> {
    items: RwLock<HashMap<Uuid, T>>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone> MemoryRepository<T> {
    /// Every stored resource, regardless of owner.
    #[cfg(test)]
    pub(crate) fn list_all(&self) -> StorageResult<Vec<T>> {
        let items = self.items.read()?;
        Ok(items.values().cloned().collect())
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OwnedRepository<T> for MemoryRepository<T>
where
    T: OwnedResource + Clone + Send + Sync,
{
    fn find_by_owner_and_id(&self, owner: &UserId, id: Uuid) -> StorageResult<Option<T>> {
        let items = self.items.read()?;
        Ok(items
            .get(&id)
            .filter(|item| guard(owner, item.owner()) == Access::Allow)
            .cloned())
    }

    fn exists_by_owner_and_id(&self, owner: &UserId, id: Uuid) -> StorageResult<bool> {
        Ok(self.find_by_owner_and_id(owner, id)?.is_some())
    }

    fn list_by_owner(&self, owner: &UserId, keyword: Option<&str>) -> StorageResult<Vec<T>> {
        let items = self.items.read()?;
        Ok(items
            .values()
            .filter(|item| visible_in_listing(*item, owner, keyword))
            .cloned()
            .collect())
    }

    fn save(&self, resource: T) -> StorageResult<T> {
        let mut items = self.items.write()?;
        items.insert(resource.id(), resource.clone());
        Ok(resource)
    }

    fn delete_by_id(&self, id: Uuid) -> StorageResult<()> {
        let mut items = self.items.write()?;
        items.remove(&id);
        Ok(())
    }
}
