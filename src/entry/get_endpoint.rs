use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, Error, database_id::EntryId, entry::Entry};

/// A route handler for getting an entry by its database ID.
///
/// Responds with 404 if the entry does not exist.
pub async fn get_entry_endpoint(
    State(state): State<AppState>,
    Path(entry_id): Path<EntryId>,
) -> Result<Json<Entry>, Error> {
    state
        .entry_ledger
        .find_by_id(entry_id)?
        .map(Json)
        .ok_or(Error::NotFound)
}
