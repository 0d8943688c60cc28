//! Utility functions for string formatting and manipulation.

pub mod format;

pub use format::{format_optional, format_price, truncate_string};
