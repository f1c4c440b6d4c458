//! Registration, authentication and lookup of users on top of a [UserStore].

use crate::{
    Error,
    user::{NewUser, User, UserID, UserStore},
};

/// The user directory.
///
/// Takes its store as a constructor argument so that it can be backed by
/// SQLite in the server and by stubs in tests.
#[derive(Debug, Clone)]
pub struct UserDirectory<S> {
    store: S,
}

impl<S> UserDirectory<S>
where
    S: UserStore,
{
    /// Create a user directory on top of `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// # Errors
    /// Returns [Error::DuplicateEmail] if `email` already belongs to a user,
    /// or a store error if the user could not be saved.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<User, Error> {
        if self.email_exists(email)? {
            return Err(Error::DuplicateEmail);
        }

        let user = self.store.create(NewUser {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })?;

        tracing::info!("Registered user {}", user.id);

        Ok(user)
    }

    /// Check `email` and `password` against the stored users.
    ///
    /// The password must match the stored password exactly.
    ///
    /// # Errors
    /// Returns [Error::UserNotFound] if no user has `email`, or
    /// [Error::InvalidCredentials] if the password does not match.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, Error> {
        let user = match self.store.get_by_email(email) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::UserNotFound),
            Err(error) => return Err(error),
        };

        if user.password != password {
            tracing::debug!("Rejected log-in attempt for user {}", user.id);
            return Err(Error::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get the user with `id`, if there is one.
    pub fn find_by_id(&self, id: UserID) -> Result<Option<User>, Error> {
        match self.store.get(id) {
            Ok(user) => Ok(Some(user)),
            Err(Error::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Whether a user is already registered with `email`.
    pub fn email_exists(&self, email: &str) -> Result<bool, Error> {
        self.store.exists_by_email(email)
    }
}
