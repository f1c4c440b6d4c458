//! Income and expense entries: the model, validation rules, storage, the
//! ledger service and the route handlers.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod get_endpoint;
mod ledger;
mod search_endpoint;
mod status_endpoint;
mod store;
mod validation;

pub use core::{
    Entry, EntryDraft, EntryFilter, EntryStatus, EntryType, NewEntry, UnknownVariant,
};
pub use create_endpoint::create_entry_endpoint;
pub use delete_endpoint::delete_entry_endpoint;
pub use edit_endpoint::edit_entry_endpoint;
pub use form::EntryForm;
pub use get_endpoint::get_entry_endpoint;
pub use ledger::EntryLedger;
pub use search_endpoint::{SearchQuery, search_entries_endpoint};
pub use status_endpoint::{StatusForm, change_entry_status_endpoint};
pub use store::{EntryStore, SQLiteEntryStore, create_entry_table};
pub use validation::{ValidationError, validate};
