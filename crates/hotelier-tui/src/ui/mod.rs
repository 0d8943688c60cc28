//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, title bar, status bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: colors and text styling
//! - `views`: page content (public pages, login, admin dashboard)

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
