//! Defines the entry store trait and an implementation for the SQLite backend.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params, params_from_iter, types::Type, types::Value};
use rust_decimal::Decimal;

use crate::{
    Error,
    database_id::EntryId,
    entry::{Entry, EntryFilter, EntryType, NewEntry},
    user::UserID,
};

/// Handles the persistence of entries.
pub trait EntryStore {
    /// Save a new entry and return it with its assigned ID.
    fn create(&mut self, entry: NewEntry) -> Result<Entry, Error>;

    /// Replace every field of the entry with `id`.
    ///
    /// Returns [Error::UpdateMissingEntry] if no entry has `id`.
    fn update(&mut self, id: EntryId, entry: NewEntry) -> Result<Entry, Error>;

    /// Remove the entry with `id`.
    ///
    /// Returns [Error::DeleteMissingEntry] if no entry has `id`.
    fn delete(&mut self, id: EntryId) -> Result<(), Error>;

    /// Retrieve an entry by its ID.
    ///
    /// Returns [Error::NotFound] if no entry has `id`.
    fn get(&self, id: EntryId) -> Result<Entry, Error>;

    /// Retrieve every entry matching `filter`, in storage order.
    fn get_query(&self, filter: &EntryFilter) -> Result<Vec<Entry>, Error>;

    /// The total value of the entries of `entry_type` owned by `user_id`.
    ///
    /// Returns zero if the user has no such entries and
    /// [Error::BalanceOverflow] if the total does not fit in a [Decimal].
    fn sum_by_type(&self, user_id: UserID, entry_type: EntryType) -> Result<Decimal, Error>;
}

/// Create the entry table in the database.
///
/// Values are stored as text so that decimals are kept exact.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS entry (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL,
                value TEXT NOT NULL,
                entry_type TEXT NOT NULL,
                status TEXT NOT NULL,
                registration_date TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Used by the balance query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_entry_user_type ON entry(user_id, entry_type);",
        (),
    )?;

    Ok(())
}

const ENTRY_COLUMNS: &str =
    "id, description, month, year, value, entry_type, status, registration_date, user_id";

/// Stores entries in a SQLite database.
///
/// Entries reference users, so the user table must be set up in the same database.
#[derive(Debug, Clone)]
pub struct SQLiteEntryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteEntryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<Entry, rusqlite::Error> {
        let raw_value: String = row.get(4)?;
        let value = parse_decimal(&raw_value, 4)?;
        let raw_user_id = row.get(8)?;

        Ok(Entry {
            id: row.get(0)?,
            description: row.get(1)?,
            month: row.get(2)?,
            year: row.get(3)?,
            value,
            entry_type: row.get(5)?,
            status: row.get(6)?,
            registration_date: row.get(7)?,
            user_id: UserID::new(raw_user_id),
        })
    }
}

fn parse_decimal(raw_value: &str, column: usize) -> Result<Decimal, rusqlite::Error> {
    raw_value
        .parse()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error)))
}

impl EntryStore for SQLiteEntryStore {
    /// Create a new entry in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UnknownUser] if the owning user does not exist,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, entry: NewEntry) -> Result<Entry, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let id = connection
            .prepare(
                "INSERT INTO entry \
                    (description, month, year, value, entry_type, status, registration_date, user_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
                 RETURNING id",
            )?
            .query_row(
                params![
                    entry.description,
                    entry.month,
                    entry.year,
                    entry.value.to_string(),
                    entry.entry_type,
                    entry.status,
                    entry.registration_date,
                    entry.user_id.as_i64(),
                ],
                |row| row.get(0),
            )
            .map_err(|error| map_foreign_key_error(error, entry.user_id))?;

        Ok(entry.finalise(id))
    }

    /// Replace the entry in the database that has `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingEntry] if `id` does not refer to a stored entry,
    /// - [Error::UnknownUser] if the owning user does not exist,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: EntryId, entry: NewEntry) -> Result<Entry, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let rows_affected = connection
            .execute(
                "UPDATE entry \
                SET \
                    description = ?1, \
                    month = ?2, \
                    year = ?3, \
                    value = ?4, \
                    entry_type = ?5, \
                    status = ?6, \
                    registration_date = ?7, \
                    user_id = ?8 \
                WHERE id = ?9",
                params![
                    entry.description,
                    entry.month,
                    entry.year,
                    entry.value.to_string(),
                    entry.entry_type,
                    entry.status,
                    entry.registration_date,
                    entry.user_id.as_i64(),
                    id,
                ],
            )
            .map_err(|error| map_foreign_key_error(error, entry.user_id))?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingEntry);
        }

        Ok(entry.finalise(id))
    }

    /// Delete the entry in the database that has `id`.
    ///
    /// # Errors
    /// This function will return a [Error::DeleteMissingEntry] if `id` does not
    /// refer to a stored entry, or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: EntryId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .execute("DELETE FROM entry WHERE id = :id", &[(":id", &id)])?;

        match rows_affected {
            0 => Err(Error::DeleteMissingEntry),
            _ => Ok(()),
        }
    }

    /// Retrieve an entry in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid entry,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: EntryId) -> Result<Entry, Error> {
        let entry = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&format!("SELECT {ENTRY_COLUMNS} FROM entry WHERE id = :id"))?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(entry)
    }

    /// Query for entries in the database, ordered by ID.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(&self, filter: &EntryFilter) -> Result<Vec<Entry>, Error> {
        let mut query_string_parts = vec![format!("SELECT {ENTRY_COLUMNS} FROM entry")];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(description) = &filter.description {
            query_parameters.push(Value::Text(description.clone()));
            where_clause_parts.push(format!("description = ?{}", query_parameters.len()));
        }

        if let Some(month) = filter.month {
            query_parameters.push(Value::Integer(month.into()));
            where_clause_parts.push(format!("month = ?{}", query_parameters.len()));
        }

        if let Some(year) = filter.year {
            query_parameters.push(Value::Integer(year.into()));
            where_clause_parts.push(format!("year = ?{}", query_parameters.len()));
        }

        if let Some(user_id) = filter.user_id {
            query_parameters.push(Value::Integer(user_id.as_i64()));
            where_clause_parts.push(format!("user_id = ?{}", query_parameters.len()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        query_string_parts.push("ORDER BY id ASC".to_owned());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_entry| maybe_entry.map_err(Error::SqlError))
            .collect()
    }

    /// Sum the values of the entries of `entry_type` owned by `user_id`.
    ///
    /// Values are summed as decimals after loading since SQLite would sum the
    /// text column as floating point.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::BalanceOverflow] if the total does not fit in a [Decimal],
    /// - or [Error::SqlError] if there is a SQL error.
    fn sum_by_type(&self, user_id: UserID, entry_type: EntryType) -> Result<Decimal, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let mut statement =
            connection.prepare("SELECT value FROM entry WHERE user_id = ?1 AND entry_type = ?2")?;

        let values = statement.query_map(params![user_id.as_i64(), entry_type], |row| {
            let raw_value: String = row.get(0)?;
            parse_decimal(&raw_value, 0)
        })?;

        let mut total = Decimal::ZERO;
        for value in values {
            total = total
                .checked_add(value?)
                .ok_or(Error::BalanceOverflow(user_id))?;
        }

        Ok(total)
    }
}

fn map_foreign_key_error(error: rusqlite::Error, user_id: UserID) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        ) => Error::UnknownUser(user_id),
        error => error.into(),
    }
}
