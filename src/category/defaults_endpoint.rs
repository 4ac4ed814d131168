//! Endpoints serving the default category name lists.
//!
//! Clients use these to offer name suggestions when creating transactions, so
//! the names are served verbatim rather than read back from the database.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::category::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};

/// The response body for the default category name endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultCategoriesResponse {
    /// The default category names.
    pub categories: Vec<String>,
}

/// Handler returning the default income category names.
pub async fn get_default_income_categories() -> Json<DefaultCategoriesResponse> {
    Json(DefaultCategoriesResponse {
        categories: DEFAULT_INCOME_CATEGORIES
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}

/// Handler returning the default expense category names.
pub async fn get_default_expense_categories() -> Json<DefaultCategoriesResponse> {
    Json(DefaultCategoriesResponse {
        categories: DEFAULT_EXPENSE_CATEGORIES
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}
