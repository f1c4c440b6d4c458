//! The JSON body clients send to create or edit an entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::EntryId,
    entry::{EntryDraft, EntryStatus, EntryType},
    user::{UserDirectory, UserID, UserStore},
};

/// The fields of an entry as sent by the client.
///
/// All fields are optional so that missing values are reported by the entry
/// validation rules rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryForm {
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
    /// Where the entry is in its lifecycle.
    pub status: Option<EntryStatus>,
    /// When the entry was recorded.
    pub registration_date: Option<Date>,
    /// The ID of the owning user.
    pub user: Option<i64>,
}

impl EntryForm {
    /// Turn the form into a draft for the entry with `id`.
    ///
    /// # Errors
    /// Returns [Error::UnknownUser] if the form names a user that does not exist.
    pub fn into_draft<S>(
        self,
        id: Option<EntryId>,
        users: &UserDirectory<S>,
    ) -> Result<EntryDraft, Error>
    where
        S: UserStore,
    {
        let user_id = match self.user.map(UserID::new) {
            Some(user_id) => match users.find_by_id(user_id)? {
                Some(user) => Some(user.id),
                None => return Err(Error::UnknownUser(user_id)),
            },
            None => None,
        };

        Ok(EntryDraft {
            id,
            description: self.description,
            month: self.month,
            year: self.year,
            value: self.value,
            entry_type: self.entry_type,
            status: self.status,
            registration_date: self.registration_date,
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use crate::{
        Error,
        db::initialize,
        entry::EntryType,
        user::{SQLiteUserStore, UserDirectory, UserID},
    };

    use super::EntryForm;

    fn get_directory() -> UserDirectory<SQLiteUserStore> {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let mut directory = UserDirectory::new(SQLiteUserStore::new(Arc::new(Mutex::new(conn))));
        directory
            .register("Ana", "ana@example.com", "hunter2")
            .unwrap();

        directory
    }

    #[test]
    fn resolves_owning_user() {
        let directory = get_directory();
        let form = EntryForm {
            description: Some("Salary".to_owned()),
            value: Some(dec!(5000)),
            entry_type: Some(EntryType::Income),
            user: Some(1),
            ..Default::default()
        };

        let draft = form.into_draft(Some(3), &directory).unwrap();

        assert_eq!(draft.id, Some(3));
        assert_eq!(draft.user_id, Some(UserID::new(1)));
        assert_eq!(draft.description.as_deref(), Some("Salary"));
    }

    #[test]
    fn rejects_unknown_user() {
        let directory = get_directory();
        let form = EntryForm {
            user: Some(42),
            ..Default::default()
        };

        let result = form.into_draft(None, &directory);

        assert_eq!(result, Err(Error::UnknownUser(UserID::new(42))));
    }

    #[test]
    fn missing_user_is_left_for_validation() {
        let directory = get_directory();

        let draft = EntryForm::default().into_draft(None, &directory).unwrap();

        assert_eq!(draft.user_id, None);
    }
}
