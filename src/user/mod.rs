//! The user directory: registration, authentication and lookup of users.

mod authenticate_endpoint;
mod balance_endpoint;
mod core;
mod directory;
mod register_endpoint;
mod store;

pub use authenticate_endpoint::{AuthenticateForm, authenticate_endpoint};
pub use balance_endpoint::get_balance_endpoint;
pub use core::{NewUser, User, UserID};
pub use directory::UserDirectory;
pub use register_endpoint::{RegisterForm, register_endpoint};
pub use store::{SQLiteUserStore, UserStore, create_user_table};
