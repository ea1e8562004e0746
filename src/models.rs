// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the expense record and the request and response data
//! structures used by the REST API. All types derive `Serialize`,
//! `Deserialize`, and `ToSchema` for automatic JSON handling and OpenAPI
//! documentation.
//!
//! ## Model Categories
//!
//! - **Expenses**: The stored record and its category
//! - **Requests**: Create and partial-update payloads
//! - **Queries**: Sorting options for listings
//! - **Responses**: Envelopes returned by the expense endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Expense identifier. Assigned by the store, never reused.
pub type ExpenseId = u64;

// =============================================================================
// Expense Models
// =============================================================================

/// Spending category attached to an expense.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Housing,
    Health,
    Entertainment,
    Shopping,
    Education,
    #[default]
    Other,
}

/// A single recorded expense.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Expense {
    /// Unique identifier, assigned at creation.
    pub id: ExpenseId,
    /// Normalized free-text description.
    pub description: String,
    /// Amount in whole currency units (always positive).
    pub amount: i64,
    /// Spending category.
    pub category: Category,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Request Models
// =============================================================================

/// Request to record a new expense.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    /// What the money was spent on (1-200 characters after normalization).
    pub description: String,
    /// Amount in whole currency units, greater than zero.
    pub amount: i64,
    /// Optional category, defaults to `other`.
    #[serde(default)]
    pub category: Option<Category>,
}

/// Partial update of an existing expense. At least one field must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateExpenseRequest {
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement amount.
    #[serde(default)]
    pub amount: Option<i64>,
    /// Replacement category.
    #[serde(default)]
    pub category: Option<Category>,
}

impl UpdateExpenseRequest {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.category.is_none()
    }
}

// =============================================================================
// Query Models
// =============================================================================

/// Fields a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Description,
    Amount,
    CreatedAt,
}

impl SortField {
    /// Parses a `sort_by` value. Unknown names yield `None`, which means
    /// "leave insertion order alone" rather than an error.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "description" => Some(Self::Description),
            "amount" => Some(Self::Amount),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

// =============================================================================
// Response Models
// =============================================================================

/// Listing of expenses with aggregate figures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ExpenseListResponse {
    /// Matching expenses, after sorting and limiting.
    pub expenses: Vec<Expense>,
    /// Number of expenses that passed the filters (before `limit`).
    pub total_count: usize,
    /// Sum of amounts over the filtered expenses (before `limit`).
    pub total_amount: i64,
}

/// Result of a description search.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ExpenseSearchResponse {
    /// The trimmed query that was matched.
    pub query: String,
    /// Matching expenses in insertion order, truncated to `limit`.
    pub results: Vec<Expense>,
    /// Number of matching expenses (before `limit`).
    pub match_count: usize,
    /// Number of expenses in the store.
    pub total_count: usize,
}

/// Single expense lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ExpenseResponse {
    pub expense: Expense,
}

/// Confirmation of a create or update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ExpenseMutationResponse {
    pub message: String,
    pub expense: Expense,
}

/// Confirmation of a delete, carrying the removed record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DeletedExpenseResponse {
    pub message: String,
    pub deleted_expense: Expense,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parses_known_names_only() {
        assert_eq!(SortField::parse("id"), Some(SortField::Id));
        assert_eq!(SortField::parse("description"), Some(SortField::Description));
        assert_eq!(SortField::parse("amount"), Some(SortField::Amount));
        assert_eq!(SortField::parse("created_at"), Some(SortField::CreatedAt));
        assert_eq!(SortField::parse("Amount"), None);
        assert_eq!(SortField::parse("price"), None);
    }

    #[test]
    fn category_defaults_to_other_and_uses_snake_case() {
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(
            serde_json::to_string(&Category::Entertainment).unwrap(),
            r#""entertainment""#
        );
        let parsed: Category = serde_json::from_str(r#""food""#).unwrap();
        assert_eq!(parsed, Category::Food);
    }

    #[test]
    fn update_request_without_fields_is_empty() {
        assert!(UpdateExpenseRequest::default().is_empty());
        let partial: UpdateExpenseRequest = serde_json::from_str(r#"{"amount": 5}"#).unwrap();
        assert!(!partial.is_empty());
        assert_eq!(partial.amount, Some(5));
        assert!(partial.description.is_none());
    }
}
