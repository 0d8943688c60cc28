//! Page content, one module per area of the client.

pub mod admin;
pub mod login;
pub mod public;
