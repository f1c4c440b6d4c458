#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    AppState, build_router, endpoints,
    entry::{Entry, EntryForm, EntryType},
    user::{RegisterForm, User},
};

/// An app state backed by a fresh in-memory database.
pub(crate) fn must_create_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");

    AppState::new(connection).expect("could not create test app state")
}

/// A test server for the full router, backed by a fresh in-memory database.
pub(crate) fn must_create_test_server() -> TestServer {
    TestServer::try_new(build_router(must_create_test_state())).expect("could not create test server")
}

/// Register a user through the API.
pub(crate) async fn must_register_user(server: &TestServer, email: &str, password: &str) -> User {
    let response = server
        .post(endpoints::USERS)
        .json(&RegisterForm {
            name: "Test User".to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<User>()
}

/// A complete, valid entry form owned by `user`.
pub(crate) fn entry_form(user: &User, value: Decimal, entry_type: EntryType) -> EntryForm {
    EntryForm {
        description: Some("Random".to_owned()),
        month: Some(1),
        year: Some(2019),
        value: Some(value),
        entry_type: Some(entry_type),
        status: None,
        registration_date: None,
        user: Some(user.id.as_i64()),
    }
}

/// Create an entry through the API.
pub(crate) async fn must_create_entry(server: &TestServer, form: &EntryForm) -> Entry {
    let response = server.post(endpoints::ENTRIES).json(form).await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Entry>()
}
