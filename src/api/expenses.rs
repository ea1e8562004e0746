// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Expense endpoints: create, list, search, lookup, update and delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{
        Category, CreateExpenseRequest, DeletedExpenseResponse, ExpenseId, ExpenseListResponse,
        ExpenseMutationResponse, ExpenseResponse, ExpenseSearchResponse, SortField, SortOrder,
        UpdateExpenseRequest,
    },
    state::AppState,
    store::{ListOptions, SearchOptions},
};

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListExpensesQuery {
    /// Inclusive lower bound on the amount.
    pub min_amount: Option<i64>,
    /// Inclusive upper bound on the amount.
    pub max_amount: Option<i64>,
    /// `id`, `description`, `amount` or `created_at`. Other values are ignored.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` by default.
    pub order: Option<SortOrder>,
    /// Maximum number of expenses to return (at least 1).
    pub limit: Option<usize>,
    /// Only return expenses in this category.
    pub category: Option<Category>,
}

impl From<ListExpensesQuery> for ListOptions {
    fn from(query: ListExpensesQuery) -> Self {
        Self {
            min_amount: query.min_amount,
            max_amount: query.max_amount,
            category: query.category,
            sort_by: query.sort_by.as_deref().and_then(SortField::parse),
            order: query.order.unwrap_or_default(),
            limit: query.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchExpensesQuery {
    /// Text to look for in descriptions.
    pub query: String,
    /// Match letter case exactly (default `false`).
    #[serde(default)]
    pub case_sensitive: bool,
    /// Require the whole description to equal the query (default `false`).
    #[serde(default)]
    pub exact_match: bool,
    /// Maximum number of results (at least 1).
    pub limit: Option<usize>,
}

impl From<SearchExpensesQuery> for SearchOptions {
    fn from(query: SearchExpensesQuery) -> Self {
        Self {
            query: query.query,
            case_sensitive: query.case_sensitive,
            exact_match: query.exact_match,
            limit: query.limit,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/v1/expenses",
    params(ListExpensesQuery),
    tag = "Expenses",
    responses(
        (status = 200, body = ExpenseListResponse),
        (status = 400, description = "Invalid amount range or limit")
    )
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(params): Query<ListExpensesQuery>,
) -> Result<Json<ExpenseListResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list(&params.into())?))
}

#[utoipa::path(
    post,
    path = "/v1/expenses",
    request_body = CreateExpenseRequest,
    tag = "Expenses",
    responses(
        (status = 201, body = ExpenseMutationResponse),
        (status = 400, description = "Invalid description or amount")
    )
)]
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseMutationResponse>), ApiError> {
    let mut store = state.store.write().await;
    let expense = store.create(request)?;
    Ok((
        StatusCode::CREATED,
        Json(ExpenseMutationResponse {
            message: "expense created".to_string(),
            expense,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/expenses/search",
    params(SearchExpensesQuery),
    tag = "Expenses",
    responses(
        (status = 200, body = ExpenseSearchResponse),
        (status = 400, description = "Empty query or invalid limit")
    )
)]
pub async fn search_expenses(
    State(state): State<AppState>,
    Query(params): Query<SearchExpensesQuery>,
) -> Result<Json<ExpenseSearchResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.search(&params.into())?))
}

#[utoipa::path(
    get,
    path = "/v1/expenses/{expense_id}",
    params(
        ("expense_id" = u64, Path, description = "Identifier of the expense")
    ),
    tag = "Expenses",
    responses(
        (status = 200, body = ExpenseResponse),
        (status = 404, description = "Expense not found")
    )
)]
pub async fn get_expense(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<AppState>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let store = state.store.read().await;
    let expense = store.get(expense_id)?;
    Ok(Json(ExpenseResponse { expense }))
}

#[utoipa::path(
    put,
    path = "/v1/expenses/{expense_id}",
    params(
        ("expense_id" = u64, Path, description = "Identifier of the expense to update")
    ),
    request_body = UpdateExpenseRequest,
    tag = "Expenses",
    responses(
        (status = 200, body = ExpenseMutationResponse),
        (status = 400, description = "No fields supplied or invalid field value"),
        (status = 404, description = "Expense not found")
    )
)]
pub async fn update_expense(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<AppState>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseMutationResponse>, ApiError> {
    let mut store = state.store.write().await;
    let expense = store.update(expense_id, request)?;
    Ok(Json(ExpenseMutationResponse {
        message: "expense updated".to_string(),
        expense,
    }))
}

#[utoipa::path(
    delete,
    path = "/v1/expenses/{expense_id}",
    params(
        ("expense_id" = u64, Path, description = "Identifier of the expense to delete")
    ),
    tag = "Expenses",
    responses(
        (status = 200, body = DeletedExpenseResponse),
        (status = 404, description = "Expense not found")
    )
)]
pub async fn delete_expense(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<AppState>,
) -> Result<Json<DeletedExpenseResponse>, ApiError> {
    let mut store = state.store.write().await;
    let deleted_expense = store.delete(expense_id)?;
    Ok(Json(DeletedExpenseResponse {
        message: "expense deleted".to_string(),
        deleted_expense,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        Json,
    };

    fn create_request(description: &str, amount: i64) -> CreateExpenseRequest {
        CreateExpenseRequest {
            description: description.into(),
            amount,
            category: None,
        }
    }

    async fn seed(state: &AppState, rows: &[(&str, i64)]) {
        let mut store = state.store.write().await;
        for (description, amount) in rows {
            store
                .create(create_request(description, *amount))
                .expect("seed expense");
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_record() {
        let state = AppState::default();

        let (status, Json(created)) = create_expense(
            State(state.clone()),
            Json(create_request("Groceries", 100)),
        )
        .await
        .expect("expense creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.expense.id, 1);

        let Json(fetched) = get_expense(Path(1), State(state.clone()))
            .await
            .expect("lookup succeeds");
        assert_eq!(fetched.expense, created.expense);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_amount() {
        let state = AppState::default();
        let err = create_expense(State(state.clone()), Json(create_request("Rent", 0)))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(state.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn list_filters_by_min_amount() {
        let state = AppState::default();
        seed(&state, &[("Snacks", 50), ("Shoes", 200)]).await;

        let Json(listing) = list_expenses(
            State(state.clone()),
            Query(ListExpensesQuery {
                min_amount: Some(100),
                ..ListExpensesQuery::default()
            }),
        )
        .await
        .expect("listing succeeds");

        assert_eq!(listing.expenses.len(), 1);
        assert_eq!(listing.expenses[0].amount, 200);
        assert_eq!(listing.total_amount, 200);
    }

    #[tokio::test]
    async fn list_ignores_unknown_sort_field() {
        let state = AppState::default();
        seed(&state, &[("b", 20), ("a", 10)]).await;

        let Json(listing) = list_expenses(
            State(state.clone()),
            Query(ListExpensesQuery {
                sort_by: Some("price".into()),
                order: Some(SortOrder::Desc),
                ..ListExpensesQuery::default()
            }),
        )
        .await
        .expect("listing succeeds");

        let ids: Vec<_> = listing.expenses.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn list_inverted_range_is_bad_request() {
        let state = AppState::default();
        let err = list_expenses(
            State(state),
            Query(ListExpensesQuery {
                min_amount: Some(10),
                max_amount: Some(1),
                ..ListExpensesQuery::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_empty_store_succeeds() {
        let Json(listing) = list_expenses(
            State(AppState::default()),
            Query(ListExpensesQuery::default()),
        )
        .await
        .expect("listing succeeds");
        assert!(listing.expenses.is_empty());
        assert_eq!(listing.total_count, 0);
        assert_eq!(listing.total_amount, 0);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_by_default() {
        let state = AppState::default();
        seed(&state, &[("Groceries list", 80), ("Rent", 900)]).await;

        let Json(found) = search_expenses(
            State(state.clone()),
            Query(SearchExpensesQuery {
                query: "groceries".into(),
                ..SearchExpensesQuery::default()
            }),
        )
        .await
        .expect("search succeeds");

        assert_eq!(found.match_count, 1);
        assert_eq!(found.results[0].description, "Groceries list");
        assert_eq!(found.total_count, 2);
    }

    #[tokio::test]
    async fn search_blank_query_is_bad_request() {
        let err = search_expenses(
            State(AppState::default()),
            Query(SearchExpensesQuery {
                query: "  ".into(),
                ..SearchExpensesQuery::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_without_fields_is_bad_request() {
        let state = AppState::default();
        seed(&state, &[("Lunch", 15)]).await;

        let err = update_expense(
            Path(1),
            State(state.clone()),
            Json(UpdateExpenseRequest::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_changes_only_amount() {
        let state = AppState::default();
        seed(&state, &[("Lunch", 15)]).await;

        let Json(updated) = update_expense(
            Path(1),
            State(state.clone()),
            Json(UpdateExpenseRequest {
                amount: Some(25),
                ..UpdateExpenseRequest::default()
            }),
        )
        .await
        .expect("update succeeds");

        assert_eq!(updated.expense.amount, 25);
        assert_eq!(updated.expense.description, "Lunch");
    }

    #[tokio::test]
    async fn delete_then_create_does_not_reuse_id() {
        let state = AppState::default();
        seed(&state, &[("Taxi", 30)]).await;

        let Json(deleted) = delete_expense(Path(1), State(state.clone()))
            .await
            .expect("delete succeeds");
        assert_eq!(deleted.deleted_expense.id, 1);

        let err = get_expense(Path(1), State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let (_, Json(created)) =
            create_expense(State(state.clone()), Json(create_request("Taxi", 30)))
                .await
                .expect("create succeeds");
        assert_eq!(created.expense.id, 2);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let state = AppState::default();
        let err = delete_expense(Path(5), State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = update_expense(
            Path(5),
            State(state),
            Json(UpdateExpenseRequest {
                description: Some("x".into()),
                ..UpdateExpenseRequest::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
