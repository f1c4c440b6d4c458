//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    entry::{EntryLedger, SQLiteEntryStore},
    user::{SQLiteUserStore, UserDirectory},
};

/// The state of the REST server.
///
/// This is where the object graph is wired together: one shared database
/// connection, a store per model and the services built on top of them.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registers, authenticates and looks up users.
    pub user_directory: UserDirectory<SQLiteUserStore>,

    /// Validates, stores and sums entries.
    pub entry_ledger: EntryLedger<SQLiteEntryStore>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            user_directory: UserDirectory::new(SQLiteUserStore::new(connection.clone())),
            entry_ledger: EntryLedger::new(SQLiteEntryStore::new(connection)),
        })
    }
}

impl FromRef<AppState> for UserDirectory<SQLiteUserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.user_directory.clone()
    }
}
