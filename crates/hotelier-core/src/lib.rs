//! Core library for the hotelier hotel-management client.
//!
//! - `auth`: bearer token decoding, the admin session guard, token storage
//! - `api`: REST client for the hotel backend
//! - `models`: users, categories, rooms, gallery items, pagination, edit bodies
//! - `routes`: the fixed route table shared by every front end
//! - `config`: persisted client configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;
pub mod utils;

pub use routes::{AdminSection, Route};
