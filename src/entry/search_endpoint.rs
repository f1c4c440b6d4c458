use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    entry::{Entry, EntryFilter},
    user::UserID,
};

/// The query parameters for searching entries.
///
/// `user` is required, every other parameter narrows the search when set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Only entries with exactly this description.
    pub description: Option<String>,
    /// Only entries for this month.
    pub month: Option<i32>,
    /// Only entries for this year.
    pub year: Option<i32>,
    /// The ID of the user whose entries to search.
    pub user: i64,
}

/// A route handler for listing a user's entries that match the query.
///
/// Responds with 400 if the user does not exist.
pub async fn search_entries_endpoint(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Entry>>, Error> {
    let user_id = UserID::new(query.user);

    if state.user_directory.find_by_id(user_id)?.is_none() {
        return Err(Error::UnknownUser(user_id));
    }

    let filter = EntryFilter {
        description: query.description,
        month: query.month,
        year: query.year,
        user_id: Some(user_id),
    };

    state.entry_ledger.search(&filter).map(Json)
}
