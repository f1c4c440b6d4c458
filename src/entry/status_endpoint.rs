use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    database_id::EntryId,
    entry::{Entry, EntryDraft, EntryStatus},
};

/// The body of a status change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusForm {
    /// The new status of the entry.
    pub status: EntryStatus,
}

/// A route handler for changing the status of a saved entry.
///
/// Responds with 400 if the entry does not exist.
pub async fn change_entry_status_endpoint(
    State(state): State<AppState>,
    Path(entry_id): Path<EntryId>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Entry>, Error> {
    let mut entry_ledger = state.entry_ledger;

    let saved_entry = entry_ledger
        .find_by_id(entry_id)?
        .ok_or(Error::EntryNotFound(entry_id))?;

    entry_ledger
        .change_status(EntryDraft::from(saved_entry), form.status)
        .map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    use crate::{
        endpoints::{self, format_endpoint},
        entry::{Entry, EntryStatus, EntryType},
        test_utils::{entry_form, must_create_entry, must_create_test_server, must_register_user},
    };

    use super::StatusForm;

    #[tokio::test]
    async fn changes_status() {
        let server = must_create_test_server();
        let user = must_register_user(&server, "ana@example.com", "hunter2").await;
        let entry = must_create_entry(&server, &entry_form(&user, dec!(10), EntryType::Income)).await;

        let response = server
            .put(&format_endpoint(endpoints::ENTRY_STATUS, entry.id))
            .json(&StatusForm {
                status: EntryStatus::Settled,
            })
            .await;

        response.assert_status_ok();
        let updated = response.json::<Entry>();
        assert_eq!(updated.status, EntryStatus::Settled);
        assert_eq!(
            Entry {
                status: entry.status,
                ..updated
            },
            entry,
            "only the status should change"
        );
    }

    #[tokio::test]
    async fn rejects_unknown_entry() {
        let server = must_create_test_server();

        let response = server
            .put(&format_endpoint(endpoints::ENTRY_STATUS, 42))
            .json(&StatusForm {
                status: EntryStatus::Cancelled,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_unknown_status_name() {
        let server = must_create_test_server();
        let user = must_register_user(&server, "ana@example.com", "hunter2").await;
        let entry = must_create_entry(&server, &entry_form(&user, dec!(10), EntryType::Income)).await;

        let response = server
            .put(&format_endpoint(endpoints::ENTRY_STATUS, entry.id))
            .json(&serde_json::json!({ "status": "DONE" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
