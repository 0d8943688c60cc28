//! Edit form for users, categories and gallery items.
//!
//! The form holds plain text per field. Submitting parses it into the
//! matching update body and validates it; the row's image URL rides along
//! unchanged.

use hotelier_core::auth::Role;
use hotelier_core::models::{
    parse_features, Category, CategoryUpdate, FieldError, GalleryItem, GalleryItemUpdate, User,
    UserUpdate,
};
use hotelier_core::AdminSection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditField {
    /// Wire name, matched against `FieldError::field`
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub editable: bool,
}

impl EditField {
    fn new(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
            editable: true,
        }
    }

    fn read_only(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            editable: false,
            ..Self::new(key, label, value)
        }
    }
}

/// A validated update, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum EditRequest {
    User { email: String, update: UserUpdate },
    Category(CategoryUpdate),
    GalleryItem(GalleryItemUpdate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub section: AdminSection,
    /// E-mail for users, name for categories and gallery items.
    pub key: String,
    pub image: Option<String>,
    pub fields: Vec<EditField>,
    pub focus: usize,
    pub errors: Vec<FieldError>,
}

impl EditForm {
    fn build(section: AdminSection, key: String, image: Option<String>, fields: Vec<EditField>) -> Self {
        let focus = fields.iter().position(|f| f.editable).unwrap_or(0);
        Self {
            section,
            key,
            image,
            fields,
            focus,
            errors: Vec::new(),
        }
    }

    pub fn for_user(user: &User) -> Self {
        let current = UserUpdate::from(user);
        Self::build(
            AdminSection::Users,
            user.email.clone(),
            current.image,
            vec![
                EditField::read_only("email", "E-mail", user.email.clone()),
                EditField::new("firstName", "First name", current.first_name),
                EditField::new("lastName", "Last name", current.last_name),
                EditField::new("phone", "Phone", current.phone),
                EditField::new("whatsApp", "WhatsApp", current.whats_app),
                EditField::new("role", "Role", current.role.to_string()),
            ],
        )
    }

    pub fn for_category(category: &Category) -> Self {
        Self::build(
            AdminSection::Categories,
            category.name.clone(),
            category.image.clone(),
            vec![
                EditField::read_only("name", "Name", category.name.clone()),
                EditField::new("price", "Price", category.price.to_string()),
                EditField::new("features", "Features", category.features_display()),
                EditField::new("description", "Description", category.description.clone()),
            ],
        )
    }

    pub fn for_gallery_item(item: &GalleryItem) -> Self {
        Self::build(
            AdminSection::GalleryItems,
            item.name.clone(),
            item.image.clone(),
            vec![
                EditField::read_only("name", "Name", item.name.clone()),
                EditField::new("description", "Description", item.description.clone()),
            ],
        )
    }

    pub fn title(&self) -> &'static str {
        match self.section {
            AdminSection::Users => " Update User ",
            AdminSection::Categories => " Update Category ",
            _ => " Update Gallery Item ",
        }
    }

    fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map_or("", |f| f.value.as_str())
    }

    pub fn focused_mut(&mut self) -> Option<&mut EditField> {
        self.fields.get_mut(self.focus).filter(|f| f.editable)
    }

    pub fn error_for(&self, key: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == key)
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(self.fields.len().saturating_sub(1));
    }

    /// Step through editable fields, wrapping around.
    fn move_focus(&mut self, step: usize) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let mut next = self.focus;
        for _ in 0..len {
            next = (next + step) % len;
            if self.fields[next].editable {
                self.focus = next;
                return;
            }
        }
    }

    /// Parse and validate the form into a request body.
    pub fn request(&self) -> Result<EditRequest, Vec<FieldError>> {
        match self.section {
            AdminSection::Users => {
                let update = UserUpdate {
                    first_name: self.value("firstName").trim().to_string(),
                    last_name: self.value("lastName").trim().to_string(),
                    phone: self.value("phone").trim().to_string(),
                    whats_app: self.value("whatsApp").trim().to_string(),
                    role: Role::from(self.value("role").trim()),
                    image: self.image.clone(),
                };
                update.validate()?;
                Ok(EditRequest::User {
                    email: self.key.clone(),
                    update,
                })
            }
            AdminSection::Categories => {
                let update = CategoryUpdate {
                    name: self.key.clone(),
                    // Unparseable input fails the price check.
                    price: self.value("price").trim().parse().unwrap_or(f64::NAN),
                    features: parse_features(self.value("features")),
                    description: self.value("description").trim().to_string(),
                    image: self.image.clone(),
                };
                update.validate()?;
                Ok(EditRequest::Category(update))
            }
            _ => {
                let update = GalleryItemUpdate {
                    name: self.key.clone(),
                    description: self.value("description").trim().to_string(),
                    image: self.image.clone(),
                };
                update.validate()?;
                Ok(EditRequest::GalleryItem(update))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        Category {
            id: None,
            name: "Deluxe".to_string(),
            price: 150.0,
            features: vec!["Wifi".to_string(), "Sea view".to_string()],
            description: "Large room".to_string(),
            image: Some("https://img/deluxe.jpg".to_string()),
            disabled: false,
        }
    }

    fn set(form: &mut EditForm, key: &str, value: &str) {
        if let Some(field) = form.fields.iter_mut().find(|f| f.key == key) {
            field.value = value.to_string();
        }
    }

    #[test]
    fn test_focus_skips_read_only_fields() {
        let mut form = EditForm::for_category(&category());
        assert_eq!(form.fields[form.focus].key, "price");

        form.focus_next();
        form.focus_next();
        assert_eq!(form.fields[form.focus].key, "description");
        form.focus_next();
        assert_eq!(form.fields[form.focus].key, "price");
        form.focus_prev();
        assert_eq!(form.fields[form.focus].key, "description");
        assert!(form.focused_mut().is_some());
    }

    #[test]
    fn test_unchanged_category_keeps_image() {
        let form = EditForm::for_category(&category());
        match form.request() {
            Ok(EditRequest::Category(update)) => {
                assert_eq!(update.name, "Deluxe");
                assert_eq!(update.features, vec!["Wifi", "Sea view"]);
                assert_eq!(update.image.as_deref(), Some("https://img/deluxe.jpg"));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_category_form_errors() {
        let mut form = EditForm::for_category(&category());
        set(&mut form, "price", "cheap");
        set(&mut form, "features", "Wifi,,Pool");
        let errors = form.request().expect_err("invalid form");
        let keys: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(keys, vec!["price", "features"]);

        form.errors = errors;
        assert_eq!(
            form.error_for("features").map(|e| e.message),
            Some("All features must be filled.")
        );
        assert!(form.error_for("description").is_none());
    }

    #[test]
    fn test_user_form_requires_names() {
        let user = User {
            id: None,
            first_name: Some("Sam".to_string()),
            last_name: Some("Guest".to_string()),
            email: "sam@example.com".to_string(),
            phone: Some("0771".to_string()),
            whats_app: Some("0771".to_string()),
            role: Role::Customer,
            image: None,
            disabled: false,
            blocked: false,
        };
        let mut form = EditForm::for_user(&user);
        assert_eq!(form.title(), " Update User ");
        assert!(!form.fields[0].editable);

        set(&mut form, "role", "admin");
        match form.request() {
            Ok(EditRequest::User { email, update }) => {
                assert_eq!(email, "sam@example.com");
                assert_eq!(update.role, Role::Admin);
            }
            other => panic!("unexpected request: {:?}", other),
        }

        set(&mut form, "firstName", " ");
        let errors = form.request().expect_err("first name missing");
        assert_eq!(errors[0].message, "First name is required.");
    }

    #[test]
    fn test_gallery_form_requires_description() {
        let item = GalleryItem {
            id: None,
            name: "Pool".to_string(),
            description: String::new(),
            image: Some("https://img/pool.jpg".to_string()),
            disabled: false,
        };
        let form = EditForm::for_gallery_item(&item);
        let errors = form.request().expect_err("description missing");
        assert_eq!(errors[0].field, "description");
    }
}
