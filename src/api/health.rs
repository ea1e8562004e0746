// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Landing response pointing clients at the API documentation.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving requests.
    pub status: String,
    /// Number of expenses currently held in memory.
    pub expense_count: usize,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Expense Management API - see /docs for the API documentation".to_string(),
    })
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness(State(state): State<AppState>) -> Json<HealthResponse> {
    let expense_count = state.store.read().await.len();
    Json(HealthResponse {
        status: "ok".to_string(),
        expense_count,
    })
}
