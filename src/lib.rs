//! minhasfinancas is a web backend for tracking personal finances.
//!
//! Users register and log in, then record income and expense entries which
//! are validated, stored, searched and summed into a balance.
//!
//! This library provides a JSON REST API over a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod config;
mod database_id;
mod db;
mod endpoints;
mod entry;
mod logging;
mod routing;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::Config;
pub use database_id::{DatabaseId, EntryId};
pub use db::initialize as initialize_db;
pub use entry::{
    Entry, EntryDraft, EntryFilter, EntryForm, EntryLedger, EntryStatus, EntryStore, EntryType,
    NewEntry, SQLiteEntryStore, SearchQuery, StatusForm, UnknownVariant, ValidationError,
    validate,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::{
    AuthenticateForm, NewUser, RegisterForm, SQLiteUserStore, User, UserDirectory, UserID,
    UserStore,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An entry failed one of the validation rules.
    ///
    /// Only the first rule that failed is reported.
    #[error("{0}")]
    InvalidEntry(ValidationError),

    /// The email used to register a user already belongs to another user.
    /// The client should try again with a different email address.
    #[error("A user is already registered with this email.")]
    DuplicateEmail,

    /// No user is registered with the email given at log-in.
    #[error("User not found.")]
    UserNotFound,

    /// The password given at log-in does not match the stored password.
    #[error("Invalid password.")]
    InvalidCredentials,

    /// An entry referred to an owning user ID that does not belong to any user.
    #[error("User not found for the given ID.")]
    UnknownUser(UserID),

    /// A user's entries add up to more than a decimal can hold.
    #[error("The balance is too large to compute.")]
    BalanceOverflow(UserID),

    /// The client referred to an entry ID that does not belong to any entry.
    #[error("Entry not found.")]
    EntryNotFound(EntryId),

    /// An entry without an ID was passed to an operation that needs an existing entry.
    ///
    /// This is a programming error in the caller, not something the end user
    /// can fix, so it is never shown to the client verbatim.
    #[error("the entry has not been saved yet and has no ID")]
    MissingIdentifier,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an entry that does not exist
    #[error("tried to update an entry that is not in the database")]
    UpdateMissingEntry,

    /// Tried to delete an entry that does not exist
    #[error("tried to delete an entry that is not in the database")]
    DeleteMissingEntry,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                Some(ref desc),
            ) if desc.ends_with("user.email") => Error::DuplicateEmail,
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::InvalidEntry(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidEntry(_)
            | Error::DuplicateEmail
            | Error::UserNotFound
            | Error::InvalidCredentials
            | Error::UnknownUser(_)
            | Error::BalanceOverflow(_)
            | Error::EntryNotFound(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            Error::NotFound | Error::UpdateMissingEntry | Error::DeleteMissingEntry => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details.",
                )
                    .into_response()
            }
        }
    }
}
