//! The endpoint for listing a user's categories.

use std::collections::BTreeMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    category::ensure_default_categories,
    models::{Category, DatabaseID, TransactionType, UserID},
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// The query parameters accepted by [get_categories].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryListQuery {
    /// Limit the listing to categories of this type.
    #[serde(rename = "type")]
    pub category_type: Option<TransactionType>,
}

/// One category as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    /// The ID of the category.
    pub id: DatabaseID,
    /// The name of the category.
    pub name: String,
    /// Whether the category groups income or expenses.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// An optional text description.
    pub description: Option<String>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
            category_type: category.category_type(),
            description: category.description().map(str::to_string),
        }
    }
}

/// The response body for [get_categories].
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    /// The number of categories listed.
    pub total: usize,
    /// The categories, ordered by name ascending.
    pub categories: Vec<CategoryView>,
    /// The number of listed categories per transaction type.
    pub summary: BTreeMap<String, usize>,
}

/// Handler for listing the authenticated user's categories.
///
/// Seeds the default categories on first use, so a fresh account always has
/// something to record transactions against.
pub async fn get_categories<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<CategoryListResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    ensure_default_categories(&mut state.category_store, user_id)?;

    let categories: Vec<CategoryView> = state
        .category_store
        .get_by_user(user_id)?
        .iter()
        .filter(|category| {
            query
                .category_type
                .is_none_or(|category_type| category.category_type() == category_type)
        })
        .map(CategoryView::from)
        .collect();

    let mut summary = BTreeMap::new();
    for category in &categories {
        *summary
            .entry(category.category_type.as_str().to_owned())
            .or_insert(0) += 1;
    }

    Ok(Json(CategoryListResponse {
        total: categories.len(),
        categories,
        summary,
    }))
}
