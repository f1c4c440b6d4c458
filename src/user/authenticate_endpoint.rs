use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    user::{SQLiteUserStore, User, UserDirectory},
};

/// The raw data entered by the user in the log-in form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticateForm {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

/// A route handler for checking a user's email and password.
///
/// Responds with the user on success and 400 if the email is not registered
/// or the password does not match.
pub async fn authenticate_endpoint(
    State(user_directory): State<UserDirectory<SQLiteUserStore>>,
    Json(form): Json<AuthenticateForm>,
) -> Result<Json<User>, Error> {
    user_directory
        .authenticate(&form.email, &form.password)
        .inspect_err(|error| tracing::debug!("Log-in failed for {}: {error}", form.email))
        .map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints,
        test_utils::{must_create_test_server, must_register_user},
        user::User,
    };

    use super::AuthenticateForm;

    #[tokio::test]
    async fn authenticates_with_correct_password() {
        let server = must_create_test_server();
        let want = must_register_user(&server, "ana@example.com", "hunter2").await;

        let response = server
            .post(endpoints::AUTHENTICATE)
            .json(&AuthenticateForm {
                email: "ana@example.com".to_owned(),
                password: "hunter2".to_owned(),
            })
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<User>(), want);
    }

    #[tokio::test]
    async fn rejects_unknown_email() {
        let server = must_create_test_server();

        let response = server
            .post(endpoints::AUTHENTICATE)
            .json(&AuthenticateForm {
                email: "nobody@example.com".to_owned(),
                password: "hunter2".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("User not found.");
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let server = must_create_test_server();
        must_register_user(&server, "ana@example.com", "hunter2").await;

        let response = server
            .post(endpoints::AUTHENTICATE)
            .json(&AuthenticateForm {
                email: "ana@example.com".to_owned(),
                password: "Hunter2".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("Invalid password.");
    }
}
