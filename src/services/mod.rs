// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Resource Services
//!
//! Business operations over owned resources. Every operation takes the
//! caller's identity explicitly and:
//!
//! 1. validates the input before touching storage,
//! 2. applies the ownership guard to anything read back from storage,
//! 3. reports "not mine" exactly like "does not exist".

pub mod cash_flows;
pub mod todos;

use chrono::{DateTime, Duration, Utc};

use crate::storage::StorageError;

pub use cash_flows::CashFlowService;
pub use todos::TodoService;

/// Error type for service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Absent, or owned by someone else
    #[error("Resource not found")]
    NotFound,

    /// Required field missing or out of range
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Storage collaborator failed
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Modification timestamp strictly after `previous`.
///
/// The wall clock can repeat a value (coarse clocks, fast successive
/// updates); in that case nudge forward by one microsecond so `updated_at`
/// always increases. Microseconds survive the JSON round trip.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
