//! Command handlers, one module per command family.

pub mod config_cmd;
pub mod users;
