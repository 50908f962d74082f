//! Screen implementations. Each screen is a top-level Component.

pub mod users;

pub use users::UsersScreen;
