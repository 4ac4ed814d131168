//! Defines the user store trait and its argument types.

use email_address::EmailAddress;

use crate::{
    Error,
    models::{PasswordHash, User, UserID},
};

/// The details needed to create a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The email address the user registers with. Must be unique.
    pub email: EmailAddress,
    /// The hash of the user's password.
    pub password_hash: PasswordHash,
    /// The display name of the user.
    pub name: Option<String>,
    /// The name of the user's business.
    pub business_name: Option<String>,
    /// The name of the business owner.
    pub business_owner: Option<String>,
    /// The user's phone number.
    pub phone_number: Option<String>,
}

/// A partial update to a user. Fields set to `None` are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    /// A new email address. Must not belong to another user.
    pub email: Option<EmailAddress>,
    /// A new display name.
    pub name: Option<String>,
    /// A new business name.
    pub business_name: Option<String>,
    /// A new business owner name.
    pub business_owner: Option<String>,
    /// A new phone number.
    pub phone_number: Option<String>,
}

/// Handles the creation and retrieval of User objects.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateEmail] if the email is already registered.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error>;

    /// Get a user by their ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their email.
    ///
    /// Returns [Error::NotFound] if no user with the given email exists.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error>;

    /// Apply a partial update to the user with `id` and return the updated
    /// user.
    fn update(&mut self, id: UserID, update: UserUpdate) -> Result<User, Error>;

    /// Replace the password hash of the user with `id`.
    fn set_password_hash(&mut self, id: UserID, password_hash: PasswordHash) -> Result<(), Error>;

    /// Delete the user with `id` along with all rows the user owns.
    fn delete(&mut self, id: UserID) -> Result<(), Error>;

    /// The number of registered users.
    fn count(&self) -> Result<usize, Error>;
}
