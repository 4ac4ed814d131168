//! This file defines categories, the named groupings that transactions are
//! recorded against, and the validated category name type.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{DatabaseID, TransactionType, UserID},
};

/// The name of a category. Must be a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is empty or contains only
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(Self(name))
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid name is provided it may cause incorrect behaviour but will not affect memory safety.
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, typed grouping for transactions, owned by a user.
///
/// A category's type decides which transactions may reference it: an INCOME
/// transaction can only be recorded against an INCOME category, and likewise
/// for EXPENSE.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    id: DatabaseID,
    name: CategoryName,
    category_type: TransactionType,
    description: Option<String>,
    user_id: UserID,
}

impl Category {
    /// Create a category from its stored parts.
    pub fn new(
        id: DatabaseID,
        name: CategoryName,
        category_type: TransactionType,
        description: Option<String>,
        user_id: UserID,
    ) -> Self {
        Self {
            id,
            name,
            category_type,
            description,
            user_id,
        }
    }

    /// The ID of the category.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The name of the category.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Whether the category groups income or expenses.
    pub fn category_type(&self) -> TransactionType {
        self.category_type
    }

    /// An optional text description of the category.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The ID of the user that owns this category.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }
}
