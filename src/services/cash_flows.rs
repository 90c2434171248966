// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cash flow operations.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::UserId;
use crate::models::{CashFlow, CashFlowRequest};
use crate::storage::ownership::normalize_keyword;
use crate::storage::{OwnedRepository, OwnershipCheck};

use super::{next_timestamp, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct CashFlowService {
    repository: Arc<dyn OwnedRepository<CashFlow>>,
}

impl CashFlowService {
    pub fn new(repository: Arc<dyn OwnedRepository<CashFlow>>) -> Self {
        Self { repository }
    }

    /// Record a new cash flow owned by `caller`.
    pub fn create(&self, caller: &UserId, request: CashFlowRequest) -> ServiceResult<CashFlow> {
        let input = request.validate().map_err(ServiceError::ValidationFailed)?;
        let flow = CashFlow::new(*caller, input, Utc::now());
        let saved = self.repository.save(flow)?;

        tracing::info!(user_id = %caller, cash_flow_id = %saved.id, "Cash flow created");
        Ok(saved)
    }

    /// Every cash flow of `caller`, narrowed by an optional keyword.
    ///
    /// Newest first.
    pub fn list(&self, caller: &UserId, keyword: Option<&str>) -> ServiceResult<Vec<CashFlow>> {
        let keyword = normalize_keyword(keyword);
        let mut flows: Vec<CashFlow> = self
            .repository
            .list_by_owner(caller, keyword.as_deref())?
            .into_iter()
            .filter(|flow| flow.owner == *caller)
            .collect();
        flows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(flows)
    }

    pub fn get(&self, caller: &UserId, id: Uuid) -> ServiceResult<CashFlow> {
        self.repository
            .find_by_owner_and_id(caller, id)?
            .owned_by(caller)
            .ok_or(ServiceError::NotFound)
    }

    /// Distinct non-empty labels used by `caller`, sorted.
    pub fn labels(&self, caller: &UserId) -> ServiceResult<Vec<String>> {
        let labels: BTreeSet<String> = self
            .repository
            .list_by_owner(caller, None)?
            .into_iter()
            .filter(|flow| flow.owner == *caller)
            .map(|flow| flow.label)
            .filter(|label| !label.trim().is_empty())
            .collect();
        Ok(labels.into_iter().collect())
    }

    /// Replace every mutable field of an owned cash flow.
    pub fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        request: CashFlowRequest,
    ) -> ServiceResult<CashFlow> {
        let input = request
            .validate_replacement()
            .map_err(ServiceError::ValidationFailed)?;
        let mut flow = self.get(caller, id)?;

        let updated_at = next_timestamp(flow.updated_at);
        flow.apply(input, updated_at);
        let saved = self.repository.save(flow)?;

        tracing::info!(user_id = %caller, cash_flow_id = %id, "Cash flow updated");
        Ok(saved)
    }

    pub fn delete(&self, caller: &UserId, id: Uuid) -> ServiceResult<()> {
        if !self.repository.exists_by_owner_and_id(caller, id)? {
            return Err(ServiceError::NotFound);
        }
        self.repository.delete_by_id(id)?;

        tracing::info!(user_id = %caller, cash_flow_id = %id, "Cash flow deleted");
        Ok(())
    }
}
