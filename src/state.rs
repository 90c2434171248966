// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::path::Path;
use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::models::{CashFlow, Todo};
use crate::services::{CashFlowService, TodoService};
use crate::storage::{
    FileRepository, JsonFileStorage, MemoryRepository, OwnedResource, StoragePaths,
    StorageResult, UserDirectory,
};

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenCodec>,
    pub users: Arc<dyn UserDirectory>,
    pub cash_flows: CashFlowService,
    pub todos: TodoService,
    /// Present when resources are persisted on disk; probed by readiness.
    pub storage: Option<JsonFileStorage>,
}

impl AppState {
    /// Resources kept in process memory.
    pub fn in_memory(tokens: Arc<TokenCodec>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            tokens,
            users,
            cash_flows: CashFlowService::new(Arc::new(MemoryRepository::new())),
            todos: TodoService::new(Arc::new(MemoryRepository::new())),
            storage: None,
        }
    }

    /// Resources persisted as JSON documents under `data_dir`.
    pub fn with_file_storage(
        tokens: Arc<TokenCodec>,
        users: Arc<dyn UserDirectory>,
        data_dir: impl AsRef<Path>,
    ) -> StorageResult<Self> {
        let mut storage = JsonFileStorage::new(StoragePaths::new(data_dir));
        storage.initialize(&[CashFlow::KIND, Todo::KIND])?;

        let cash_flows = FileRepository::<CashFlow>::new(storage.clone())?;
        let todos = FileRepository::<Todo>::new(storage.clone())?;

        Ok(Self {
            tokens,
            users,
            cash_flows: CashFlowService::new(Arc::new(cash_flows)),
            todos: TodoService::new(Arc::new(todos)),
            storage: Some(storage),
        })
    }
}
