//! Request bodies for the admin edit forms.
//!
//! Each body starts from the listed row, so an unchanged image URL is sent
//! back as-is. `validate` reports every failing field at once.

use std::fmt;

use serde::Serialize;

use super::{Category, GalleryItem, User};
use crate::auth::Role;

/// A form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Split a comma-separated feature list, keeping empty entries so they can
/// be rejected. An entirely blank input means no features.
pub fn parse_features(input: &str) -> Vec<String> {
    if blank(input) {
        return Vec::new();
    }
    input.split(',').map(|f| f.trim().to_string()).collect()
}

/// Body of `PUT /api/categories/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUpdate {
    pub name: String,
    pub price: f64,
    pub features: Vec<String>,
    pub description: String,
    pub image: Option<String>,
}

impl CategoryUpdate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if !self.price.is_finite() || self.price <= 0.0 {
            errors.push(FieldError::new("price", "Price must be a positive value."));
        }
        if blank(&self.description) {
            errors.push(FieldError::new("description", "Description is required."));
        }
        if self.features.iter().any(|f| blank(f)) {
            errors.push(FieldError::new("features", "All features must be filled."));
        }
        finish(errors)
    }
}

impl From<&Category> for CategoryUpdate {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            price: c.price,
            features: c.features.clone(),
            description: c.description.clone(),
            image: c.image.clone(),
        }
    }
}

/// Body of `PUT /api/users/{email}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    #[serde(rename = "whatsApp")]
    pub whats_app: String,
    pub role: Role,
    pub image: Option<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if blank(&self.first_name) {
            errors.push(FieldError::new("firstName", "First name is required."));
        }
        if blank(&self.last_name) {
            errors.push(FieldError::new("lastName", "Last name is required."));
        }
        if blank(&self.phone) {
            errors.push(FieldError::new(
                "phone",
                "Phone number is required and must be in valid format.",
            ));
        }
        if blank(&self.whats_app) {
            errors.push(FieldError::new(
                "whatsApp",
                "WhatsApp number is required and must be in valid format.",
            ));
        }
        if blank(self.role.as_str()) {
            errors.push(FieldError::new("role", "Role is required."));
        }
        finish(errors)
    }
}

impl From<&User> for UserUpdate {
    fn from(u: &User) -> Self {
        Self {
            first_name: u.first_name.clone().unwrap_or_default(),
            last_name: u.last_name.clone().unwrap_or_default(),
            phone: u.phone.clone().unwrap_or_default(),
            whats_app: u.whats_app.clone().unwrap_or_default(),
            role: u.role.clone(),
            image: u.image.clone(),
        }
    }
}

/// Body of `PUT /api/gallery/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItemUpdate {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

impl GalleryItemUpdate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if blank(&self.description) {
            errors.push(FieldError::new("description", "Description is required."));
        }
        finish(errors)
    }
}

impl From<&GalleryItem> for GalleryItemUpdate {
    fn from(g: &GalleryItem) -> Self {
        Self {
            name: g.name.clone(),
            description: g.description.clone(),
            image: g.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        serde_json::from_str(
            r#"{"name":"Deluxe","price":150,"features":["Wifi"],"description":"Large","image":"https://img/1.jpg"}"#,
        )
        .expect("Failed to parse category JSON")
    }

    fn fields(result: Result<(), Vec<FieldError>>) -> Vec<&'static str> {
        result.err().unwrap_or_default().iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_parse_features() {
        assert!(parse_features("").is_empty());
        assert!(parse_features("   ").is_empty());
        assert_eq!(parse_features("Wifi, Sea view"), vec!["Wifi", "Sea view"]);
        assert_eq!(parse_features("Wifi,,Pool"), vec!["Wifi", "", "Pool"]);
        assert_eq!(parse_features("Wifi, "), vec!["Wifi", ""]);
    }

    #[test]
    fn test_category_update_keeps_image() {
        let update = CategoryUpdate::from(&category());
        assert_eq!(update.image.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(update.validate(), Ok(()));

        let body = serde_json::to_value(&update).expect("serializes");
        assert_eq!(body["image"], "https://img/1.jpg");
        assert_eq!(body["features"], serde_json::json!(["Wifi"]));
    }

    #[test]
    fn test_category_update_validation() {
        let mut update = CategoryUpdate::from(&category());
        update.price = 0.0;
        update.description = "  ".to_string();
        update.features = parse_features("Wifi,,Pool");
        assert_eq!(fields(update.validate()), vec!["price", "description", "features"]);

        update.price = -5.0;
        update.description = "Fine".to_string();
        update.features = Vec::new();
        assert_eq!(fields(update.validate()), vec!["price"]);
    }

    #[test]
    fn test_user_update_validation() {
        let user: User = serde_json::from_str(
            r#"{"email":"sam@example.com","firstName":"Sam","type":"customer","image":"https://img/sam.jpg"}"#,
        )
        .expect("Failed to parse user JSON");
        let mut update = UserUpdate::from(&user);
        assert_eq!(update.image.as_deref(), Some("https://img/sam.jpg"));
        assert_eq!(fields(update.validate()), vec!["lastName", "phone", "whatsApp"]);

        update.last_name = "Guest".to_string();
        update.phone = "0771".to_string();
        update.whats_app = "0771".to_string();
        update.role = Role::from("");
        let errors = update.validate().expect_err("blank role");
        assert_eq!(errors[0].to_string(), "Role is required.");

        update.role = Role::Admin;
        assert_eq!(update.validate(), Ok(()));
        let body = serde_json::to_value(&update).expect("serializes");
        assert_eq!(body["whatsApp"], "0771");
        assert_eq!(body["role"], "admin");
    }

    #[test]
    fn test_gallery_update_validation() {
        let item: GalleryItem =
            serde_json::from_str(r#"{"name":"Pool","image":"https://img/pool.jpg"}"#)
                .expect("Failed to parse gallery JSON");
        let mut update = GalleryItemUpdate::from(&item);
        assert_eq!(fields(update.validate()), vec!["description"]);

        update.description = "Rooftop pool".to_string();
        assert_eq!(update.validate(), Ok(()));
        assert_eq!(update.image.as_deref(), Some("https://img/pool.jpg"));
    }
}
