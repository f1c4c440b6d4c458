use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState, Error,
    entry::{Entry, EntryForm},
};

/// A route handler for creating a new entry.
///
/// Responds with 201 and the stored entry, or 400 with the first broken
/// entry rule.
pub async fn create_entry_endpoint(
    State(state): State<AppState>,
    Json(form): Json<EntryForm>,
) -> Result<(StatusCode, Json<Entry>), Error> {
    let AppState {
        user_directory,
        mut entry_ledger,
    } = state;

    let draft = form.into_draft(None, &user_directory)?;
    let entry = entry_ledger.create(draft)?;

    Ok((StatusCode::CREATED, Json(entry)))
}
