//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, TransactionType, UserID},
};

/// Creates and retrieves transaction categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(
        &mut self,
        name: CategoryName,
        category_type: TransactionType,
        description: Option<String>,
        user_id: UserID,
    ) -> Result<Category, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get all categories for a given user, ordered by name ascending.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// The number of categories the given user has.
    fn count_by_user(&self, user_id: UserID) -> Result<usize, Error>;
}
