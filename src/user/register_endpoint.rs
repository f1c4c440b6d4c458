use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    user::{SQLiteUserStore, User, UserDirectory},
};

/// The data for registering a user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterForm {
    /// The user's display name.
    pub name: String,
    /// Email entered during registration.
    pub email: String,
    /// Password entered during registration.
    pub password: String,
}

/// A route handler for registering a new user, responds with 201 and the user.
///
/// Responds with 400 if the email is already taken.
pub async fn register_endpoint(
    State(mut user_directory): State<UserDirectory<SQLiteUserStore>>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<User>), Error> {
    let user = user_directory.register(&form.name, &form.email, &form.password)?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::{
        endpoints,
        test_utils::{must_create_test_server, must_register_user},
        user::User,
    };

    use super::RegisterForm;

    #[tokio::test]
    async fn registers_user() {
        let server = must_create_test_server();

        let response = server
            .post(endpoints::USERS)
            .json(&RegisterForm {
                name: "Ana".to_owned(),
                email: "ana@example.com".to_owned(),
                password: "hunter2".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let user = response.json::<User>();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");
    }

    #[tokio::test]
    async fn response_does_not_contain_password() {
        let server = must_create_test_server();

        let response = server
            .post(endpoints::USERS)
            .json(&RegisterForm {
                name: "Ana".to_owned(),
                email: "ana@example.com".to_owned(),
                password: "hunter2".to_owned(),
            })
            .await;

        let body = response.json::<Value>();
        assert!(body.get("password").is_none(), "got {body}");
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let server = must_create_test_server();
        must_register_user(&server, "ana@example.com", "hunter2").await;

        let response = server
            .post(endpoints::USERS)
            .json(&RegisterForm {
                name: "Another Ana".to_owned(),
                email: "ana@example.com".to_owned(),
                password: "hunter3".to_owned(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("A user is already registered with this email.");
    }
}
