// roster-api: Async Rust client for the user directory HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::UserClient;
pub use error::Error;
pub use models::{NewUserRequest, UserRecord};
pub use transport::TransportConfig;
