//! The validation gate every entry passes before it is written to the store.

use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::entry::{EntryDraft, NewEntry};

/// The rules an entry can break, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The description is missing or empty.
    #[error("Enter a valid description.")]
    EmptyDescription,

    /// The month is missing or outside 1 to 12.
    #[error("Enter a valid month.")]
    InvalidMonth,

    /// The year is missing or does not have four digits.
    #[error("Enter a valid year.")]
    InvalidYear,

    /// The entry has no owning user.
    #[error("Enter a user.")]
    MissingUser,

    /// The value is missing, zero or negative.
    #[error("Enter a valid value.")]
    InvalidValue,

    /// The entry type is missing.
    #[error("Enter an entry type.")]
    MissingType,
}

/// Check `draft` against the entry rules and convert it into a [NewEntry].
///
/// Rules are checked in the order description, month, year, user, value,
/// type, and only the first broken rule is reported.
///
/// A missing status becomes [Pending](crate::EntryStatus::Pending) and a
/// missing registration date becomes today's date (UTC). The draft's ID is
/// ignored.
pub fn validate(draft: &EntryDraft) -> Result<NewEntry, ValidationError> {
    let description = match draft.description.as_deref() {
        Some(description) if !description.trim().is_empty() => description.to_owned(),
        _ => return Err(ValidationError::EmptyDescription),
    };

    let month = draft
        .month
        .filter(|month| (1..=12).contains(month))
        .and_then(|month| u8::try_from(month).ok())
        .ok_or(ValidationError::InvalidMonth)?;

    let year = draft
        .year
        .filter(|year| (1000..=9999).contains(year))
        .and_then(|year| u16::try_from(year).ok())
        .ok_or(ValidationError::InvalidYear)?;

    let user_id = draft.user_id.ok_or(ValidationError::MissingUser)?;

    let value = draft
        .value
        .filter(|value| *value > Decimal::ZERO)
        .ok_or(ValidationError::InvalidValue)?;

    let entry_type = draft.entry_type.ok_or(ValidationError::MissingType)?;

    Ok(NewEntry {
        description,
        month,
        year,
        value,
        entry_type,
        status: draft.status.unwrap_or_default(),
        registration_date: draft
            .registration_date
            .unwrap_or_else(|| OffsetDateTime::now_utc().date()),
        user_id,
    })
}
