// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the owned resources and the request and response
//! structures used by the REST API. All wire types derive `Serialize` or
//! `Deserialize` and `ToSchema` for JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Cash flows**: income and expense records with source and label
//! - **Todos**: to-do items with a completion flag
//!
//! Request bodies never carry an owner. The owner of a new resource is always
//! the authenticated caller, supplied by the service.
//!
//! Request fields are optional on the wire so that a missing field is
//! reported as a validation failure (400) rather than a body rejection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::UserId;
use crate::storage::OwnedResource;

// =============================================================================
// Cash Flow Models
// =============================================================================

/// Direction of a cash flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowType {
    Income,
    Expense,
}

impl CashFlowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashFlowType::Income => "income",
            CashFlowType::Expense => "expense",
        }
    }
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CashFlowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(CashFlowType::Income),
            "expense" => Ok(CashFlowType::Expense),
            other => Err(format!("unknown cash flow type '{other}'")),
        }
    }
}

/// A single income or expense record owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CashFlow {
    pub id: Uuid,
    /// Identity that created the record. Never taken from client input.
    pub owner: UserId,
    #[serde(rename = "type")]
    pub flow_type: CashFlowType,
    /// Where the money came from or went to (e.g. "Bank", "Cash").
    pub source: String,
    /// Free-form grouping label (e.g. "salary", "groceries").
    pub label: String,
    /// Whole currency units, always positive.
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated mutable fields of a cash flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashFlowInput {
    pub flow_type: CashFlowType,
    pub source: String,
    pub label: String,
    pub amount: i64,
    pub description: String,
}

impl CashFlow {
    pub fn new(owner: UserId, input: CashFlowInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            flow_type: input.flow_type,
            source: input.source,
            label: input.label,
            amount: input.amount,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. Identity, owner and `created_at` stay.
    pub fn apply(&mut self, input: CashFlowInput, updated_at: DateTime<Utc>) {
        self.flow_type = input.flow_type;
        self.source = input.source;
        self.label = input.label;
        self.amount = input.amount;
        self.description = input.description;
        self.updated_at = updated_at;
    }
}

impl OwnedResource for CashFlow {
    const KIND: &'static str = "cash_flows";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.owner
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.flow_type.as_str(),
            self.source.as_str(),
            self.label.as_str(),
            self.description.as_str(),
        ]
    }
}

/// Body of `POST /api/cash-flows` and `PUT /api/cash-flows/{id}`.
///
/// `type`, `amount` and `description` are always required. On create,
/// `source` and `label` default to empty strings; a replacement must carry
/// them, even if empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CashFlowRequest {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    #[schema(example = "income")]
    pub flow_type: Option<String>,
    pub source: Option<String>,
    pub label: Option<String>,
    /// Must be greater than zero.
    pub amount: Option<i64>,
    pub description: Option<String>,
}

impl CashFlowRequest {
    /// Check required fields and positivity.
    pub fn validate(self) -> Result<CashFlowInput, String> {
        let flow_type = self
            .flow_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| "type is required".to_string())?
            .parse::<CashFlowType>()?;

        let amount = self.amount.ok_or_else(|| "amount is required".to_string())?;
        if amount <= 0 {
            return Err("amount must be greater than zero".to_string());
        }

        let description = required_text(self.description, "description")?;

        Ok(CashFlowInput {
            flow_type,
            source: self.source.unwrap_or_default(),
            label: self.label.unwrap_or_default(),
            amount,
            description,
        })
    }

    /// Validation for `PUT`, where every mutable field must be present.
    pub fn validate_replacement(self) -> Result<CashFlowInput, String> {
        require_present(&self.source, "source")?;
        require_present(&self.label, "label")?;
        self.validate()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CashFlowListResponse {
    pub cash_flows: Vec<CashFlow>,
    pub total: usize,
}

/// Distinct non-empty labels of the caller, sorted.
#[derive(Debug, Serialize, ToSchema)]
pub struct LabelsResponse {
    pub labels: Vec<String>,
}

// =============================================================================
// Todo Models
// =============================================================================

/// A to-do item owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub is_finished: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated mutable fields of a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
    pub is_finished: bool,
}

impl Todo {
    /// New unfinished todo.
    pub fn new(owner: UserId, title: String, description: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            title,
            description,
            is_finished: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: TodoInput, updated_at: DateTime<Utc>) {
        self.title = input.title;
        self.description = input.description;
        self.is_finished = input.is_finished;
        self.updated_at = updated_at;
    }
}

impl OwnedResource for Todo {
    const KIND: &'static str = "todos";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.owner
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

/// Body of `POST /api/todos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CreateTodoRequest {
    pub fn validate(self) -> Result<TodoInput, String> {
        Ok(TodoInput {
            title: required_text(self.title, "title")?,
            description: self.description.unwrap_or_default(),
            is_finished: false,
        })
    }
}

/// Body of `PUT /api/todos/{id}`. Replaces every mutable field, so all
/// three are required; `description` may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_finished: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn validate(self) -> Result<TodoInput, String> {
        let title = required_text(self.title, "title")?;
        let description = self
            .description
            .ok_or_else(|| "description is required".to_string())?;
        let is_finished = self
            .is_finished
            .ok_or_else(|| "is_finished is required".to_string())?;
        Ok(TodoInput {
            title,
            description,
            is_finished,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
    pub total: usize,
}

fn required_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(format!("{field} is required")),
    }
}

fn require_present(value: &Option<String>, field: &str) -> Result<(), String> {
    match value {
        Some(_) => Ok(()),
        None => Err(format!("{field} is required")),
    }
}
