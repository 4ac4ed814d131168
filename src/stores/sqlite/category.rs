//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID, TransactionType, UserID},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn create(
        &mut self,
        name: CategoryName,
        category_type: TransactionType,
        description: Option<String>,
        user_id: UserID,
    ) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO category (name, type, description, user_id) VALUES (?1, ?2, ?3, ?4);",
            (name.as_ref(), category_type, &description, user_id.as_i64()),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category::new(id, name, category_type, description, user_id))
    }

    /// Retrieve the category with `category_id` from the database.
    ///
    /// # Errors
    /// This function will return [Error::NotFound] if the category does not
    /// exist, or [Error::SqlError] if there is some other SQL error.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, type, description, user_id FROM category WHERE id = :id;")?
            .query_row(&[(":id", &category_id)], SQLiteCategoryStore::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve all of a user's categories, ordered by name ascending.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, type, description, user_id FROM category
                 WHERE user_id = :user_id
                 ORDER BY name ASC;",
            )?
            .query_map(
                &[(":user_id", &user_id.as_i64())],
                SQLiteCategoryStore::map_row,
            )?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// The number of categories belonging to the user.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn count_by_user(&self, user_id: UserID) -> Result<usize, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row(
                "SELECT COUNT(id) FROM category WHERE user_id = :user_id;",
                &[(":user_id", &user_id.as_i64())],
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                description TEXT,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(raw_name);

        let category_type = row.get(offset + 2)?;
        let description = row.get(offset + 3)?;
        let user_id = UserID::new(row.get(offset + 4)?);

        Ok(Self::ReturnType::new(
            id,
            name,
            category_type,
            description,
            user_id,
        ))
    }
}
