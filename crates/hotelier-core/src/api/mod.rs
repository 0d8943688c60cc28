//! REST API client module for the hotel backend.
//!
//! This module provides the `ApiClient` for logging in and for the admin
//! dashboard's listings and actions (users, categories, gallery, rooms).
//!
//! Authenticated calls carry the session's bearer token.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
