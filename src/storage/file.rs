// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON file storage.
//!
//! Each resource is one pretty-printed JSON document named after its id.
//! Writes go to a temporary file first and are renamed into place, so a
//! reader never observes a half-written document.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::auth::UserId;

use super::ownership::{guard, visible_in_listing, Access};
use super::{OwnedRepository, OwnedResource, StorageError, StoragePaths, StorageResult};

/// Low-level JSON document store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    paths: StoragePaths,
    initialized: bool,
}

impl JsonFileStorage {
    /// Does NOT create any directory. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Create the collection directories. Safe to call multiple times.
    pub fn initialize(&mut self, collections: &[&str]) -> StorageResult<()> {
        fs::create_dir_all(self.paths.root())?;
        for kind in collections {
            fs::create_dir_all(self.paths.collection_dir(kind))?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Write-read-delete probe used by the readiness check.
    pub fn health_check(&self) -> StorageResult<()> {
        self.ensure_initialized()?;

        let probe = self.paths.root().join(".health_check");
        let payload = b"health_check_data";
        fs::write(&probe, payload)?;
        let read_back = fs::read(&probe)?;
        fs::remove_file(&probe)?;

        if read_back != payload {
            return Err(StorageError::Backend(
                "health check data mismatch".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_initialized(&self) -> StorageResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StorageError::NotInitialized)
        }
    }

    /// Read and deserialize a document. A missing file yields `None`.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<Option<T>> {
        self.ensure_initialized()?;

        let file = match File::open(path.as_ref()) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    /// Atomic write via rename.
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        self.ensure_initialized()?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Delete a document. Missing files are ignored.
    pub fn delete(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        self.ensure_initialized()?;

        match fs::remove_file(path.as_ref()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids (file stems) of every `.json` document in `dir`.
    pub fn list_ids(&self, dir: impl AsRef<Path>) -> StorageResult<Vec<Uuid>> {
        self.ensure_initialized()?;

        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| Uuid::parse_str(stem).ok())
            {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

/// Repository storing one JSON document per resource.
pub struct FileRepository<T> {
    storage: JsonFileStorage,
    // Serialises read-modify-write sequences within this process.
    write_lock: Mutex<()>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: OwnedResource> FileRepository<T> {
    /// Wrap an initialised storage. Creates the collection directory.
    pub fn new(mut storage: JsonFileStorage) -> StorageResult<Self> {
        storage.initialize(&[T::KIND])?;
        Ok(Self {
            storage,
            write_lock: Mutex::new(()),
            _kind: PhantomData,
        })
    }

    pub fn storage(&self) -> &JsonFileStorage {
        &self.storage
    }
}

impl<T> FileRepository<T>
where
    T: OwnedResource + Serialize + DeserializeOwned,
{
    fn load(&self, id: Uuid) -> StorageResult<Option<T>> {
        self.storage
            .read_json(self.storage.paths().document(T::KIND, id))
    }
}

impl<T> OwnedRepository<T> for FileRepository<T>
where
    T: OwnedResource + Serialize + DeserializeOwned + Send + Sync,
{
    fn find_by_owner_and_id(&self, owner: &UserId, id: Uuid) -> StorageResult<Option<T>> {
        Ok(self
            .load(id)?
            .filter(|item| guard(owner, item.owner()) == Access::Allow))
    }

    fn exists_by_owner_and_id(&self, owner: &UserId, id: Uuid) -> StorageResult<bool> {
        Ok(self.find_by_owner_and_id(owner, id)?.is_some())
    }

    fn list_by_owner(&self, owner: &UserId, keyword: Option<&str>) -> StorageResult<Vec<T>> {
        let ids = self
            .storage
            .list_ids(self.storage.paths().collection_dir(T::KIND))?;

        let mut items = Vec::new();
        for id in ids {
            match self.load(id) {
                Ok(Some(item)) if visible_in_listing(&item, owner, keyword) => items.push(item),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(kind = T::KIND, id = %id, error = %e, "Skipping unreadable document");
                }
            }
        }
        Ok(items)
    }

    fn save(&self, resource: T) -> StorageResult<T> {
        let _guard = self.write_lock.lock()?;
        self.storage.write_json(
            self.storage.paths().document(T::KIND, resource.id()),
            &resource,
        )?;
        Ok(resource)
    }

    fn delete_by_id(&self, id: Uuid) -> StorageResult<()> {
        let _guard = self.write_lock.lock()?;
        self.storage
            .delete(self.storage.paths().document(T::KIND, id))
    }
}
