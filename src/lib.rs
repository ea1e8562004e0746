// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Expense Server - In-Memory Expense Bookkeeping Service
//!
//! This crate provides a small HTTP service for recording personal expenses
//! and querying them by amount range, sort order and description text.
//! Records live only in process memory.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and OpenAPI document
//! - `store` - Expense collection, id assignment and queries
//! - `validation` - Description normalization and field policy
//! - `config` - Environment-driven runtime configuration

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod validation;
