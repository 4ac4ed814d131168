//! Transaction categories: the default set, first-use seeding, and the
//! listing endpoints.

mod core;
mod defaults_endpoint;
mod list_endpoint;

pub use core::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES, ensure_default_categories};
pub use defaults_endpoint::{get_default_expense_categories, get_default_income_categories};
pub use list_endpoint::{CategoryListResponse, CategoryView, get_categories};
