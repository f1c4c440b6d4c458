//! Defines the data models for finance entries.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{database_id::EntryId, user::UserID};

// ============================================================================
// MODELS
// ============================================================================

/// Whether an entry records money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl EntryType {
    const ALL: [EntryType; 2] = [EntryType::Income, EntryType::Expense];

    /// The name used for this type in the database and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }
}

/// The lifecycle marker of an entry.
///
/// Any status may be changed to any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// The entry has been recorded but the money has not moved yet.
    #[default]
    Pending,
    /// The money has moved.
    Settled,
    /// The entry will not happen.
    Cancelled,
}

impl EntryStatus {
    const ALL: [EntryStatus; 3] = [
        EntryStatus::Pending,
        EntryStatus::Settled,
        EntryStatus::Cancelled,
    ];

    /// The name used for this status in the database and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Settled => "SETTLED",
            EntryStatus::Cancelled => "CANCELLED",
        }
    }
}

/// The error returned when parsing an unknown entry type or status name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a valid name")]
pub struct UnknownVariant(String);

/// Implements [Display], [FromStr], [ToSql] and [FromSql] for an enum in
/// terms of its `as_str` name and its `ALL` list of variants.
macro_rules! impl_named_variants {
    ($($name:ty),+) => {$(
        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| UnknownVariant(s.to_owned()))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|error| FromSqlError::Other(Box::new(error)))
            }
        }
    )+};
}

impl_named_variants!(EntryType, EntryStatus);

/// A stored income or expense record owned by a user.
///
/// To create a new `Entry`, build an [EntryDraft] and pass it to
/// [EntryLedger::create](crate::EntryLedger::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The ID of the entry.
    pub id: EntryId,
    /// A text description of what the entry is for.
    pub description: String,
    /// The month of the entry, 1 to 12.
    pub month: u8,
    /// The four digit year of the entry.
    pub year: u16,
    /// The amount of money earned or spent, always positive.
    pub value: Decimal,
    /// Whether the money was earned or spent.
    pub entry_type: EntryType,
    /// Where the entry is in its lifecycle.
    pub status: EntryStatus,
    /// When the entry was recorded.
    pub registration_date: Date,
    /// The user that owns the entry.
    pub user_id: UserID,
}

/// An entry that passed validation and is ready to be written to the store.
///
/// The only way to get one outside of tests is [validate](crate::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// A non-empty description.
    pub description: String,
    /// A month from 1 to 12.
    pub month: u8,
    /// A year from 1000 to 9999.
    pub year: u16,
    /// A strictly positive amount.
    pub value: Decimal,
    /// Whether the money was earned or spent.
    pub entry_type: EntryType,
    /// Where the entry is in its lifecycle.
    pub status: EntryStatus,
    /// When the entry was recorded.
    pub registration_date: Date,
    /// The user that owns the entry.
    pub user_id: UserID,
}

impl NewEntry {
    /// Attach the ID assigned by the store.
    pub fn finalise(self, id: EntryId) -> Entry {
        Entry {
            id,
            description: self.description,
            month: self.month,
            year: self.year,
            value: self.value,
            entry_type: self.entry_type,
            status: self.status,
            registration_date: self.registration_date,
            user_id: self.user_id,
        }
    }
}

/// An entry as supplied by a client, before validation.
///
/// Every field may be missing. Numbers use wide types so that out of range
/// values reach the validator instead of failing to deserialize.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    /// The ID of the entry, set only for entries that have been saved.
    pub id: Option<EntryId>,
    /// A text description of what the entry is for.
    pub description: Option<String>,
    /// The month of the entry.
    pub month: Option<i32>,
    /// The year of the entry.
    pub year: Option<i32>,
    /// The amount of money earned or spent.
    pub value: Option<Decimal>,
    /// Whether the money was earned or spent.
    pub entry_type: Option<EntryType>,
    /// Where the entry is in its lifecycle, defaults to [EntryStatus::Pending].
    pub status: Option<EntryStatus>,
    /// When the entry was recorded, defaults to today.
    pub registration_date: Option<Date>,
    /// The user that owns the entry.
    pub user_id: Option<UserID>,
}

impl From<Entry> for EntryDraft {
    fn from(entry: Entry) -> Self {
        Self {
            id: Some(entry.id),
            description: Some(entry.description),
            month: Some(entry.month.into()),
            year: Some(entry.year.into()),
            value: Some(entry.value),
            entry_type: Some(entry.entry_type),
            status: Some(entry.status),
            registration_date: Some(entry.registration_date),
            user_id: Some(entry.user_id),
        }
    }
}

/// Selects entries by example: each field that is set must equal the stored
/// field, unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    /// Only entries with exactly this description.
    pub description: Option<String>,
    /// Only entries for this month.
    pub month: Option<i32>,
    /// Only entries for this year.
    pub year: Option<i32>,
    /// Only entries owned by this user.
    pub user_id: Option<UserID>,
}
