// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cashbook - Multi-tenant Cash Flow and To-do Service
//!
//! Every resource belongs to the user whose bearer token created it, and is
//! invisible to everyone else. A foreign resource is reported exactly like a
//! missing one.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and the OpenAPI document
//! - `auth` - Token codec, identity resolution and the `Auth` extractor
//! - `services` - Validation and ownership-guarded resource operations
//! - `storage` - Repository contracts, in-memory and JSON file backends
//! - `server` - Process bootstrap and graceful shutdown

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
