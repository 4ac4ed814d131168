//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, PasswordHash};

/// A newtype wrapper for integer user IDs.
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// Holds the credential hash alongside the business profile, so it is never
/// serialized directly; API responses go through [User::profile].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    email: EmailAddress,
    password_hash: PasswordHash,
    name: Option<String>,
    business_name: Option<String>,
    business_owner: Option<String>,
    phone_number: Option<String>,
}

impl User {
    /// Create a user from its stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserID,
        email: EmailAddress,
        password_hash: PasswordHash,
        name: Option<String>,
        business_name: Option<String>,
        business_owner: Option<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            name,
            business_name,
            business_owner,
            phone_number,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The email address associated with the user.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The user's password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// The display name of the user, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name of the user's business, if set.
    pub fn business_name(&self) -> Option<&str> {
        self.business_name.as_deref()
    }

    /// The name of the business owner, if set.
    pub fn business_owner(&self) -> Option<&str> {
        self.business_owner.as_deref()
    }

    /// The user's phone number, if set.
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// The user's public profile, the shape served by the API.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.as_i64(),
            email: self.email.to_string(),
            name: self.name.clone(),
            business_name: self.business_name.clone(),
            business_owner: self.business_owner.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// The public view of a user, without the credential hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// The user's ID in the database.
    pub id: DatabaseID,
    /// The email address associated with the user.
    pub email: String,
    /// The display name of the user.
    pub name: Option<String>,
    /// The name of the user's business.
    pub business_name: Option<String>,
    /// The name of the business owner.
    pub business_owner: Option<String>,
    /// The user's phone number.
    pub phone_number: Option<String>,
}
