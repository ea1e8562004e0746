// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory expense store.
//!
//! Owns the expense collection and the identifier counter. Nothing is
//! persisted; a fresh store starts empty (or from the records handed to
//! [`ExpenseStore::with_expenses`]).
//!
//! The store is a plain synchronous type. Callers sharing it between tasks
//! wrap it in a single lock (see [`crate::state::AppState`]), which keeps
//! id assignment and collection mutation under one guard.

use std::cmp::Ordering;

use chrono::Utc;

use crate::error::StoreError;
use crate::models::{
    Category, CreateExpenseRequest, Expense, ExpenseId, ExpenseListResponse,
    ExpenseSearchResponse, SortField, SortOrder, UpdateExpenseRequest,
};
use crate::validation::{normalize_description, ExpensePolicy};

/// Filtering, sorting and limiting options for [`ExpenseStore::list`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Inclusive lower bound on `amount`.
    pub min_amount: Option<i64>,
    /// Inclusive upper bound on `amount`.
    pub max_amount: Option<i64>,
    /// Only keep expenses in this category.
    pub category: Option<Category>,
    /// Sort key; `None` keeps insertion order.
    pub sort_by: Option<SortField>,
    pub order: SortOrder,
    /// Maximum number of records returned, applied last.
    pub limit: Option<usize>,
}

/// Options for [`ExpenseStore::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub query: String,
    pub case_sensitive: bool,
    /// Compare whole descriptions instead of testing containment.
    pub exact_match: bool,
    pub limit: Option<usize>,
}

#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    next_id: ExpenseId,
    policy: ExpensePolicy,
}

impl ExpenseStore {
    pub fn new(policy: ExpensePolicy) -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
            policy,
        }
    }

    /// Builds a store holding `expenses` in the given order. The counter
    /// continues after the largest existing id.
    pub fn with_expenses(policy: ExpensePolicy, expenses: Vec<Expense>) -> Self {
        let next_id = expenses.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            expenses,
            next_id,
            policy,
        }
    }

    /// Store preloaded with a handful of sample household expenses.
    pub fn with_sample_data(policy: ExpensePolicy) -> Self {
        let mut store = Self::new(policy);
        let samples = [
            ("خرید مواد غذایی", 250_000, Category::Food),
            ("پرداخت قبض برق", 185_000, Category::Utilities),
            ("خرید بنزین", 120_000, Category::Transport),
            ("هزینه اینترنت ماهانه", 95_000, Category::Utilities),
            ("خرید لباس", 420_000, Category::Shopping),
        ];
        for (description, amount, category) in samples {
            let expense = Expense {
                id: store.next_id,
                description: description.to_string(),
                amount,
                category,
                created_at: Utc::now(),
            };
            store.next_id += 1;
            store.expenses.push(expense);
        }
        store
    }

    pub fn policy(&self) -> &ExpensePolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn create(&mut self, request: CreateExpenseRequest) -> Result<Expense, StoreError> {
        let description = self.policy.description(&request.description)?;
        let amount = self.policy.amount(request.amount)?;

        let expense = Expense {
            id: self.next_id,
            description,
            amount,
            category: request.category.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.expenses.push(expense.clone());

        tracing::info!(expense_id = expense.id, amount = expense.amount, "expense created");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Expense, StoreError> {
        self.expenses
            .iter()
            .find(|expense| expense.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Filters, then sorts, then limits. Totals cover the filtered set
    /// before the limit is applied.
    pub fn list(&self, options: &ListOptions) -> Result<ExpenseListResponse, StoreError> {
        if let (Some(min), Some(max)) = (options.min_amount, options.max_amount) {
            if min > max {
                return Err(StoreError::InvalidRange { min, max });
            }
        }
        validate_limit(options.limit)?;

        let mut expenses: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| options.min_amount.is_none_or(|min| e.amount >= min))
            .filter(|e| options.max_amount.is_none_or(|max| e.amount <= max))
            .filter(|e| options.category.is_none_or(|c| e.category == c))
            .cloned()
            .collect();

        if let Some(field) = options.sort_by {
            // Stable sort: ties keep insertion order in both directions.
            expenses.sort_by(|a, b| {
                let ordering = compare_by(field, a, b);
                match options.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let total_count = expenses.len();
        let total_amount = expenses
            .iter()
            .try_fold(0i64, |acc, e| acc.checked_add(e.amount))
            .ok_or(StoreError::TotalOverflow)?;

        if let Some(limit) = options.limit {
            expenses.truncate(limit);
        }

        tracing::debug!(
            returned = expenses.len(),
            total_count,
            total_amount,
            "listed expenses"
        );

        Ok(ExpenseListResponse {
            expenses,
            total_count,
            total_amount,
        })
    }

    /// Matches descriptions against the query, normalized the same way
    /// descriptions are, preserving insertion order. No matches is an empty
    /// result, not an error.
    pub fn search(&self, options: &SearchOptions) -> Result<ExpenseSearchResponse, StoreError> {
        let query = normalize_description(&options.query);
        if query.is_empty() {
            return Err(StoreError::validation("search query must not be empty"));
        }
        validate_limit(options.limit)?;

        let needle = fold(&query, options.case_sensitive);
        let matches: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|e| {
                let haystack = fold(&e.description, options.case_sensitive);
                if options.exact_match {
                    haystack == needle
                } else {
                    haystack.contains(needle.as_str())
                }
            })
            .collect();

        let match_count = matches.len();
        let results = matches
            .into_iter()
            .take(options.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        tracing::debug!(query = %query, match_count, "searched expenses");

        Ok(ExpenseSearchResponse {
            query,
            results,
            match_count,
            total_count: self.expenses.len(),
        })
    }

    /// Overwrites only the supplied fields. Every supplied field is checked
    /// before anything is written.
    pub fn update(
        &mut self,
        id: ExpenseId,
        request: UpdateExpenseRequest,
    ) -> Result<Expense, StoreError> {
        if request.is_empty() {
            return Err(StoreError::validation(
                "nothing to update: provide at least one of description, amount or category",
            ));
        }

        let description = request
            .description
            .as_deref()
            .map(|raw| self.policy.description(raw))
            .transpose()?;
        let amount = request
            .amount
            .map(|amount| self.policy.amount(amount))
            .transpose()?;

        let expense = self
            .expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(description) = description {
            expense.description = description;
        }
        if let Some(amount) = amount {
            expense.amount = amount;
        }
        if let Some(category) = request.category {
            expense.category = category;
        }

        tracing::info!(expense_id = id, "expense updated");
        Ok(expense.clone())
    }

    pub fn delete(&mut self, id: ExpenseId) -> Result<Expense, StoreError> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.expenses.remove(index);
        tracing::info!(expense_id = id, "expense deleted");
        Ok(removed)
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new(ExpensePolicy::default())
    }
}

fn validate_limit(limit: Option<usize>) -> Result<(), StoreError> {
    if limit == Some(0) {
        return Err(StoreError::validation("limit must be at least 1"));
    }
    Ok(())
}

fn compare_by(field: SortField, a: &Expense, b: &Expense) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}
