// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! To-do operations.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::UserId;
use crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::storage::ownership::normalize_keyword;
use crate::storage::{OwnedRepository, OwnershipCheck};

use super::{next_timestamp, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn OwnedRepository<Todo>>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn OwnedRepository<Todo>>) -> Self {
        Self { repository }
    }

    pub fn create(&self, caller: &UserId, request: CreateTodoRequest) -> ServiceResult<Todo> {
        let input = request.validate().map_err(ServiceError::ValidationFailed)?;
        let todo = Todo::new(*caller, input.title, input.description, Utc::now());
        let saved = self.repository.save(todo)?;

        tracing::info!(user_id = %caller, todo_id = %saved.id, "Todo created");
        Ok(saved)
    }

    /// Todos of `caller`, oldest first.
    pub fn list(&self, caller: &UserId, keyword: Option<&str>) -> ServiceResult<Vec<Todo>> {
        let keyword = normalize_keyword(keyword);
        let mut todos: Vec<Todo> = self
            .repository
            .list_by_owner(caller, keyword.as_deref())?
            .into_iter()
            .filter(|todo| todo.owner == *caller)
            .collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(todos)
    }

    pub fn get(&self, caller: &UserId, id: Uuid) -> ServiceResult<Todo> {
        self.repository
            .find_by_owner_and_id(caller, id)?
            .owned_by(caller)
            .ok_or(ServiceError::NotFound)
    }

    pub fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        request: UpdateTodoRequest,
    ) -> ServiceResult<Todo> {
        let input = request.validate().map_err(ServiceError::ValidationFailed)?;
        let mut todo = self.get(caller, id)?;

        let updated_at = next_timestamp(todo.updated_at);
        todo.apply(input, updated_at);
        let saved = self.repository.save(todo)?;

        tracing::info!(user_id = %caller, todo_id = %id, finished = saved.is_finished, "Todo updated");
        Ok(saved)
    }

    pub fn delete(&self, caller: &UserId, id: Uuid) -> ServiceResult<()> {
        if !self.repository.exists_by_owner_and_id(caller, id)? {
            return Err(ServiceError::NotFound);
        }
        self.repository.delete_by_id(id)?;

        tracing::info!(user_id = %caller, todo_id = %id, "Todo deleted");
        Ok(())
    }
}
