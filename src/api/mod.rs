// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        Category, CreateExpenseRequest, DeletedExpenseResponse, Expense, ExpenseListResponse,
        ExpenseMutationResponse, ExpenseResponse, ExpenseSearchResponse, SortOrder,
        UpdateExpenseRequest,
    },
    state::AppState,
};

pub mod expenses;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/expenses",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route("/expenses/search", get(expenses::search_expenses))
        .route(
            "/expenses/{expense_id}",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        );

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::liveness))
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Expense Management API",
        description = "Record, list, search, update and delete expenses held in memory."
    ),
    paths(
        health::root,
        health::liveness,
        expenses::list_expenses,
        expenses::create_expense,
        expenses::search_expenses,
        expenses::get_expense,
        expenses::update_expense,
        expenses::delete_expense
    ),
    components(
        schemas(
            Expense,
            Category,
            SortOrder,
            CreateExpenseRequest,
            UpdateExpenseRequest,
            ExpenseListResponse,
            ExpenseSearchResponse,
            ExpenseResponse,
            ExpenseMutationResponse,
            DeletedExpenseResponse,
            health::RootResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Expenses", description = "Expense bookkeeping"),
        (name = "Health", description = "Service status")
    )
)]
struct ApiDoc;
