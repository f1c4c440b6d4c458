//! Defines the user model.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from entry IDs, leading to better compile time
/// errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user of the application.
///
/// Users are never modified after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The user's email, unique across all users.
    pub email: String,
    /// The user's password.
    ///
    /// Stored and compared as plain text. It is never sent back to clients.
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// The details needed to register a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's display name.
    pub name: String,
    /// The user's email.
    pub email: String,
    /// The user's password.
    pub password: String,
}

impl NewUser {
    /// Attach the ID assigned by the store.
    pub fn finalise(self, id: UserID) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::user::{User, UserID};

    #[test]
    fn password_is_not_serialized() {
        let user = User {
            id: UserID::new(1),
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            password: "hunter2".to_owned(),
        };

        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("hunter2"), "password leaked in {json}");
        assert!(!json.contains("password"), "password field leaked in {json}");
    }
}
