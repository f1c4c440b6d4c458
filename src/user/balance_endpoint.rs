use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::{AppState, Error, user::UserID};

/// A route handler for a user's balance: total income minus total expenses.
///
/// Responds with 404 if the user does not exist.
pub async fn get_balance_endpoint(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Decimal>, Error> {
    let user_id = UserID::new(user_id);

    if state.user_directory.find_by_id(user_id)?.is_none() {
        return Err(Error::NotFound);
    }

    state.entry_ledger.balance(user_id).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        endpoints::{self, format_endpoint},
        entry::{EntryForm, EntryStatus, EntryType},
        test_utils::{entry_form, must_create_entry, must_create_test_server, must_register_user},
    };

    #[tokio::test]
    async fn balance_is_income_minus_expenses() {
        let server = must_create_test_server();
        let user = must_register_user(&server, "ana@example.com", "hunter2").await;
        must_create_entry(&server, &entry_form(&user, dec!(100), EntryType::Income)).await;
        must_create_entry(&server, &entry_form(&user, dec!(50), EntryType::Expense)).await;

        let response = server
            .get(&format_endpoint(endpoints::USER_BALANCE, user.id.as_i64()))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Decimal>(), dec!(50));
    }

    #[tokio::test]
    async fn balance_is_zero_without_entries() {
        let server = must_create_test_server();
        let user = must_register_user(&server, "ana@example.com", "hunter2").await;

        let response = server
            .get(&format_endpoint(endpoints::USER_BALANCE, user.id.as_i64()))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Decimal>(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn balance_ignores_other_users() {
        let server = must_create_test_server();
        let ana = must_register_user(&server, "ana@example.com", "hunter2").await;
        let bia = must_register_user(&server, "bia@example.com", "hunter3").await;
        must_create_entry(&server, &entry_form(&ana, dec!(12.50), EntryType::Income)).await;
        must_create_entry(
            &server,
            &EntryForm {
                status: Some(EntryStatus::Settled),
                ..entry_form(&bia, dec!(1000), EntryType::Income)
            },
        )
        .await;

        let response = server
            .get(&format_endpoint(endpoints::USER_BALANCE, ana.id.as_i64()))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Decimal>(), dec!(12.50));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let server = must_create_test_server();

        let response = server
            .get(&format_endpoint(endpoints::USER_BALANCE, 42))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn overflowing_balance_is_rejected_and_server_keeps_working() {
        let server = must_create_test_server();
        let user = must_register_user(&server, "ana@example.com", "hunter2").await;
        must_create_entry(&server, &entry_form(&user, Decimal::MAX, EntryType::Income)).await;
        must_create_entry(&server, &entry_form(&user, Decimal::MAX, EntryType::Income)).await;

        let response = server
            .get(&format_endpoint(endpoints::USER_BALANCE, user.id.as_i64()))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("The balance is too large to compute.");
        must_register_user(&server, "bia@example.com", "hunter3").await;
    }
}
