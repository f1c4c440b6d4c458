//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/entries/{entry_id}', use [format_endpoint].

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to register users.
pub const USERS: &str = "/api/users";
/// The route for checking a user's email and password.
pub const AUTHENTICATE: &str = "/api/users/authenticate";
/// The route for a user's balance.
pub const USER_BALANCE: &str = "/api/users/{user_id}/balance";
/// The route to create and search entries.
pub const ENTRIES: &str = "/api/entries";
/// The route to get, update or delete a single entry.
pub const ENTRY: &str = "/api/entries/{entry_id}";
/// The route to change the status of an entry.
pub const ENTRY_STATUS: &str = "/api/entries/{entry_id}/status";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Endpoints are expected to contain at most one parameter, e.g. '{entry_id}'.
/// Paths without a parameter are returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => {
            format!(
                "{}{id}{}",
                &endpoint_path[..start],
                &endpoint_path[end + 1..]
            )
        }
        _ => endpoint_path.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ENTRIES, ENTRY_STATUS, USER_BALANCE, format_endpoint};

    #[test]
    fn replaces_parameter() {
        assert_eq!(format_endpoint(USER_BALANCE, 7), "/api/users/7/balance");
        assert_eq!(format_endpoint(ENTRY_STATUS, 12), "/api/entries/12/status");
    }

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(format_endpoint(ENTRIES, 1), ENTRIES);
    }
}
