use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "whatsApp", default)]
    pub whats_app: Option<String>,
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub blocked: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{} {}", first, last).trim().to_string()
    }

    pub fn status_display(&self) -> &'static str {
        if self.disabled {
            "Disabled"
        } else {
            "Enabled"
        }
    }

    pub fn blocked_display(&self) -> &'static str {
        if self.blocked {
            "Blocked"
        } else {
            "Active"
        }
    }
}

/// Body returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Admins land on the dashboard, everyone else on the home page.
    pub fn landing_route(&self) -> Route {
        landing_route(&self.user.role)
    }
}

pub fn landing_route(role: &Role) -> Route {
    if role.is_admin() {
        Route::ADMIN
    } else {
        Route::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"message":"Login successful","token":"a.b.c","user":{"_id":"66f1","firstName":"Ada","lastName":"Admin","email":"ada@example.com","type":"admin","whatsApp":"0771234567","disabled":false}}"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("Failed to parse login JSON");

        assert_eq!(resp.token, "a.b.c");
        assert_eq!(resp.user.role, Role::Admin);
        assert_eq!(resp.user.full_name(), "Ada Admin");
        assert_eq!(resp.landing_route(), Route::ADMIN);
        assert!(!resp.user.blocked);
    }

    #[test]
    fn test_customer_lands_home() {
        let json = r#"{"token":"a.b.c","user":{"email":"c@example.com","type":"customer"}}"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("Failed to parse login JSON");
        assert_eq!(resp.landing_route(), Route::Home);
        assert_eq!(resp.user.full_name(), "");
        assert_eq!(resp.user.status_display(), "Enabled");
    }
}
