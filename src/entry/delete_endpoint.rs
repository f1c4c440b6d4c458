use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    database_id::EntryId,
    entry::EntryDraft,
};

/// A route handler for deleting an entry, responds with 204 No Content.
///
/// Responds with 400 if the entry does not exist.
pub async fn delete_entry_endpoint(
    State(state): State<AppState>,
    Path(entry_id): Path<EntryId>,
) -> Result<StatusCode, Error> {
    let mut entry_ledger = state.entry_ledger;

    let saved_entry = entry_ledger
        .find_by_id(entry_id)?
        .ok_or(Error::EntryNotFound(entry_id))?;

    entry_ledger.delete(&EntryDraft::from(saved_entry))?;

    Ok(StatusCode::NO_CONTENT)
}
