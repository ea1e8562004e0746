// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::ExpenseStore;

/// Shared handler state.
///
/// Every store operation goes through this one lock: lookups, listings and
/// searches take the read side, create/update/delete take the write side.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ExpenseStore>>,
}

impl AppState {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ExpenseStore::default())
    }
}
