use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    database_id::EntryId,
    entry::{Entry, EntryForm},
};

/// A route handler for replacing a saved entry.
///
/// The form is validated again in full. Responds with 400 if the entry does
/// not exist or the form breaks an entry rule.
pub async fn edit_entry_endpoint(
    State(state): State<AppState>,
    Path(entry_id): Path<EntryId>,
    Json(form): Json<EntryForm>,
) -> Result<Json<Entry>, Error> {
    let AppState {
        user_directory,
        mut entry_ledger,
    } = state;

    let saved_entry = entry_ledger
        .find_by_id(entry_id)?
        .ok_or(Error::EntryNotFound(entry_id))?;

    let draft = form.into_draft(Some(saved_entry.id), &user_directory)?;

    entry_ledger.update(draft).map(Json)
}
