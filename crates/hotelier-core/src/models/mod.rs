//! Data models for hotel backend entities.
//!
//! - `User`, `LoginResponse`: accounts and the login payload
//! - `Category`: room categories with price and features
//! - `Room`: individual rooms
//! - `GalleryItem`: gallery entries shown on the public site
//! - `Pagination`, `ListPage`: server-side paging for admin tables
//! - `CategoryUpdate`, `UserUpdate`, `GalleryItemUpdate`: edit form bodies

pub mod category;
pub mod gallery;
pub mod page;
pub mod room;
pub mod update;
pub mod user;

pub use category::Category;
pub use gallery::GalleryItem;
pub use page::{ListPage, Pagination, PAGE_SIZE_OPTIONS};
pub use room::Room;
pub use update::{parse_features, CategoryUpdate, FieldError, GalleryItemUpdate, UserUpdate};
pub use user::{LoginResponse, User};
