//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};

use crate::{
    AppState, endpoints,
    entry::{
        change_entry_status_endpoint, create_entry_endpoint, delete_entry_endpoint,
        edit_entry_endpoint, get_entry_endpoint, search_entries_endpoint,
    },
    logging::logging_middleware,
    user::{authenticate_endpoint, get_balance_endpoint, register_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(endpoints::USERS, post(register_endpoint))
        .route(endpoints::AUTHENTICATE, post(authenticate_endpoint))
        .route(endpoints::USER_BALANCE, get(get_balance_endpoint));

    let entry_routes = Router::new()
        .route(
            endpoints::ENTRIES,
            post(create_entry_endpoint).get(search_entries_endpoint),
        )
        .route(
            endpoints::ENTRY,
            get(get_entry_endpoint)
                .put(edit_entry_endpoint)
                .delete(delete_entry_endpoint),
        )
        .route(endpoints::ENTRY_STATUS, put(change_entry_status_endpoint));

    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .merge(user_routes)
        .merge(entry_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found.").into_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;

    use crate::{endpoints, test_utils::must_create_test_server};

    #[tokio::test]
    async fn coffee_is_a_teapot() {
        let server = must_create_test_server();

        let response = server.get(endpoints::COFFEE).await;

        response.assert_status(StatusCode::IM_A_TEAPOT);
        response.assert_text("I'm a teapot");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = must_create_test_server();

        let response = server.get("/api/accounts").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let server = must_create_test_server();

        let response = server.patch(endpoints::ENTRIES).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
