// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistence collaborators consumed by the resource services.
//!
//! ## Contracts
//!
//! - [`OwnedRepository`]: find / exists / list by owner, save, delete by id
//! - [`UserDirectory`]: user profile lookup by identity
//!
//! ## Backends
//!
//! - [`MemoryRepository`]: process-local maps, the default
//! - [`FileRepository`]: one JSON document per resource under `DATA_DIR`
//!
//! ```text
//! {DATA_DIR}/
//!   cash_flows/{id}.json
//!   todos/{id}.json
//! ```
//!
//! Ownership filtering lives in [`ownership`]; every backend applies it the
//! same way so that list and lookup never cross owners.

pub mod file;
pub mod memory;
pub mod ownership;
pub mod paths;
pub mod repository;
pub mod users;

pub use file::{FileRepository, JsonFileStorage};
pub use memory::MemoryRepository;
pub use ownership::{Access, OwnedResource, OwnershipCheck};
pub use paths::StoragePaths;
pub use repository::OwnedRepository;
pub use users::{MemoryUserDirectory, UserDirectory, UserProfile};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File storage used before `initialize`
    #[error("Storage not initialized")]
    NotInitialized,

    /// A lock guarding in-memory state was poisoned by a panicking writer
    #[error("Storage lock poisoned: {0}")]
    Poisoned(String),

    /// Any other backend failure
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        StorageError::Poisoned(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
