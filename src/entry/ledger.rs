//! The entry ledger: validates entries, keeps them in an [EntryStore] and
//! computes balances.

use rust_decimal::Decimal;

use crate::{
    Error,
    database_id::EntryId,
    entry::{Entry, EntryDraft, EntryFilter, EntryStatus, EntryStore, EntryType, validate},
    user::UserID,
};

/// The entry ledger.
///
/// Takes its store as a constructor argument so that it can be backed by
/// SQLite in the server and by stubs in tests.
#[derive(Debug, Clone)]
pub struct EntryLedger<S> {
    store: S,
}

impl<S> EntryLedger<S>
where
    S: EntryStore,
{
    /// Create an entry ledger on top of `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `draft` and save it as a new entry.
    ///
    /// New entries always start out as [EntryStatus::Pending], whatever the
    /// draft says.
    ///
    /// # Errors
    /// Returns [Error::InvalidEntry] if the draft breaks an entry rule, in
    /// which case nothing is written to the store.
    pub fn create(&mut self, draft: EntryDraft) -> Result<Entry, Error> {
        let mut entry = validate(&draft)?;
        entry.status = EntryStatus::Pending;

        let entry = self.store.create(entry)?;
        tracing::info!("Created entry {} for user {}", entry.id, entry.user_id);

        Ok(entry)
    }

    /// Validate `draft` and replace the stored entry with the same ID.
    ///
    /// # Errors
    /// Returns [Error::MissingIdentifier] if the draft has no ID, which is
    /// checked before anything else, or [Error::InvalidEntry] if the draft
    /// breaks an entry rule.
    pub fn update(&mut self, draft: EntryDraft) -> Result<Entry, Error> {
        let id = draft.id.ok_or(Error::MissingIdentifier)?;
        let entry = validate(&draft)?;

        let entry = self.store.update(id, entry)?;
        tracing::info!("Updated entry {id}");

        Ok(entry)
    }

    /// Remove a saved entry. The entry is not validated.
    ///
    /// # Errors
    /// Returns [Error::MissingIdentifier] if the entry has no ID.
    pub fn delete(&mut self, draft: &EntryDraft) -> Result<(), Error> {
        let id = draft.id.ok_or(Error::MissingIdentifier)?;

        self.store.delete(id)?;
        tracing::info!("Deleted entry {id}");

        Ok(())
    }

    /// Set the status of a saved entry, then [update](Self::update) it.
    ///
    /// Any status may replace any other status.
    pub fn change_status(
        &mut self,
        mut draft: EntryDraft,
        status: EntryStatus,
    ) -> Result<Entry, Error> {
        draft.status = Some(status);

        self.update(draft)
    }

    /// Get the entry with `id`, if there is one.
    pub fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, Error> {
        match self.store.get(id) {
            Ok(entry) => Ok(Some(entry)),
            Err(Error::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Get every entry that matches the set fields of `filter`.
    pub fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, Error> {
        self.store.get_query(filter)
    }

    /// The user's income minus the user's expenses.
    ///
    /// Entries of every status are counted. Returns zero for a user without entries.
    ///
    /// # Errors
    /// Returns [Error::BalanceOverflow] if a total does not fit in a [Decimal].
    pub fn balance(&self, user_id: UserID) -> Result<Decimal, Error> {
        let income = self.store.sum_by_type(user_id, EntryType::Income)?;
        let expenses = self.store.sum_by_type(user_id, EntryType::Expense)?;

        income
            .checked_sub(expenses)
            .ok_or(Error::BalanceOverflow(user_id))
    }
}
