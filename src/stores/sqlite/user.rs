//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use email_address::EmailAddress;
use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{PasswordHash, User, UserID},
    stores::{NewUser, UserStore, UserUpdate},
};

const USER_COLUMNS: &str = "id, email, password, name, business_name, business_owner, phone_number";

/// Handles the creation and retrieval of User objects in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if the email is already registered, or
    /// [Error::SqlError] if an SQL related error occurred.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO user (email, password, name, business_name, business_owner, phone_number)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &new_user.email.to_string(),
                new_user.password_hash.to_string(),
                &new_user.name,
                &new_user.business_name,
                &new_user.business_owner,
                &new_user.phone_number,
            ),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(
            id,
            new_user.email,
            new_user.password_hash,
            new_user.name,
            new_user.business_name,
            new_user.business_owner,
            new_user.phone_number,
        ))
    }

    /// Get the user from the database that has the specified `id`, or return [Error::NotFound] if such user does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no user with the specified ID or [Error::SqlError] if there are SQL related errors.
    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE id = :id"))?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    /// Get the user from the database that has the specified `email` address, or return [Error::NotFound] if such user does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no user with the specified email or [Error::SqlError] if there are SQL related errors.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {USER_COLUMNS} FROM user WHERE email = :email"
            ))?
            .query_row(&[(":email", &email.to_string())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    /// Apply a partial update to the user with `id`.
    ///
    /// Fields that are `None` keep their current value.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if the new email belongs to another
    /// user, [Error::NotFound] if there is no user with the specified ID, or
    /// [Error::SqlError] if there are SQL related errors.
    fn update(&mut self, id: UserID, update: UserUpdate) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "UPDATE user SET
                    email = COALESCE(?1, email),
                    name = COALESCE(?2, name),
                    business_name = COALESCE(?3, business_name),
                    business_owner = COALESCE(?4, business_owner),
                    phone_number = COALESCE(?5, phone_number)
                 WHERE id = ?6
                 RETURNING {USER_COLUMNS}"
            ))?
            .query_row(
                (
                    update.email.map(|email| email.to_string()),
                    update.name,
                    update.business_name,
                    update.business_owner,
                    update.phone_number,
                    id.as_i64(),
                ),
                SQLiteUserStore::map_row,
            )
            .map_err(|error| error.into())
    }

    /// Replace the password hash of the user with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no user with the specified ID or [Error::SqlError] if there are SQL related errors.
    fn set_password_hash(&mut self, id: UserID, password_hash: PasswordHash) -> Result<(), Error> {
        let rows_changed = self.connection.lock().unwrap().execute(
            "UPDATE user SET password = ?1 WHERE id = ?2",
            (password_hash.to_string(), id.as_i64()),
        )?;

        if rows_changed == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Delete the user with `id`.
    ///
    /// Rows owned by the user (transactions, categories, monthly reports) are
    /// removed by the cascading foreign keys set up in
    /// [initialize](crate::db::initialize).
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no user with the specified ID or [Error::SqlError] if there are SQL related errors.
    fn delete(&mut self, id: UserID) -> Result<(), Error> {
        let rows_changed = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM user WHERE id = :id", &[(":id", &id.as_i64())])?;

        if rows_changed == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn count(&self) -> Result<usize, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL,
                    name TEXT,
                    business_name TEXT,
                    business_owner TEXT,
                    phone_number TEXT
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let raw_email: String = row.get(offset + 1)?;
        let raw_password_hash: String = row.get(offset + 2)?;

        let id = UserID::new(raw_id);
        let email = EmailAddress::new_unchecked(raw_email);
        let password_hash = PasswordHash::new_unchecked(raw_password_hash);

        Ok(Self::ReturnType::new(
            id,
            email,
            password_hash,
            row.get(offset + 3)?,
            row.get(offset + 4)?,
            row.get(offset + 5)?,
            row.get(offset + 6)?,
        ))
    }
}
