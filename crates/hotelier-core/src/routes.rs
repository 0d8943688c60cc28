//! Route table for the hotel client.
//!
//! Every screen is addressed by a fixed path. Admin screens live under
//! `/admin/...` and are gated by the session guard.

/// Path of the login screen, where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Path of the public home screen, where non-admin users are sent.
pub const HOME_PATH: &str = "/";

/// Sections of the admin dashboard, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Bookings,
    Rooms,
    Users,
    Categories,
    Feedback,
    Tickets,
    GalleryItems,
}

impl AdminSection {
    pub const ALL: [AdminSection; 7] = [
        AdminSection::Bookings,
        AdminSection::Rooms,
        AdminSection::Users,
        AdminSection::Categories,
        AdminSection::Feedback,
        AdminSection::Tickets,
        AdminSection::GalleryItems,
    ];

    /// Sidebar label.
    pub fn title(&self) -> &'static str {
        match self {
            AdminSection::Bookings => "Bookings",
            AdminSection::Rooms => "Rooms",
            AdminSection::Users => "Users",
            AdminSection::Categories => "Category",
            AdminSection::Feedback => "Feedback",
            AdminSection::Tickets => "Ticket",
            AdminSection::GalleryItems => "Gallery Items",
        }
    }

    /// Path segment after `/admin/`.
    pub fn slug(&self) -> &'static str {
        match self {
            AdminSection::Bookings => "bookings",
            AdminSection::Rooms => "rooms",
            AdminSection::Users => "users",
            AdminSection::Categories => "category",
            AdminSection::Feedback => "feedback",
            AdminSection::Tickets => "ticket",
            AdminSection::GalleryItems => "gallery-items",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    /// Whether the backend exposes a listing for this section.
    pub fn has_backend(&self) -> bool {
        matches!(
            self,
            AdminSection::Rooms
                | AdminSection::Users
                | AdminSection::Categories
                | AdminSection::GalleryItems
        )
    }

    /// Get the next section (wrapping around)
    pub fn next(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Get the previous section (wrapping around)
    pub fn prev(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

/// A client-side destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Rooms,
    Categories,
    Admin(AdminSection),
}

impl Route {
    /// Landing route of the admin dashboard.
    pub const ADMIN: Route = Route::Admin(AdminSection::Bookings);

    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME_PATH.to_string(),
            Route::Login => LOGIN_PATH.to_string(),
            Route::Rooms => "/rooms".to_string(),
            Route::Categories => "/categories".to_string(),
            Route::Admin(section) => format!("/admin/{}", section.slug()),
        }
    }

    /// Resolve a path to a route. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();

        match path {
            "" | "/" => return Some(Route::Home),
            "/login" => return Some(Route::Login),
            "/rooms" => return Some(Route::Rooms),
            "/categories" => return Some(Route::Categories),
            "/admin" | "/admin/" => return Some(Route::ADMIN),
            _ => {}
        }

        let rest = path.strip_prefix("/admin/")?;
        AdminSection::from_slug(rest.trim_end_matches('/')).map(Route::Admin)
    }

    /// Admin-only routes must pass the session guard before rendering.
    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin(_))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_paths_round_trip() {
        for section in AdminSection::ALL {
            let route = Route::Admin(section);
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_fixed_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/admin"), Some(Route::ADMIN));
        assert_eq!(Route::parse("/admin/"), Some(Route::ADMIN));
        assert_eq!(
            Route::parse("/admin/gallery-items?page=2"),
            Some(Route::Admin(AdminSection::GalleryItems))
        );
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/admin/unknown"), None);
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("admin/users"), None);
    }

    #[test]
    fn test_requires_admin() {
        assert!(Route::Admin(AdminSection::Users).requires_admin());
        assert!(!Route::Home.requires_admin());
        assert!(!Route::Login.requires_admin());
        assert!(!Route::Rooms.requires_admin());
    }

    #[test]
    fn test_section_next_prev_wrap() {
        assert_eq!(AdminSection::Bookings.prev(), AdminSection::GalleryItems);
        assert_eq!(AdminSection::GalleryItems.next(), AdminSection::Bookings);
        assert_eq!(AdminSection::Rooms.next(), AdminSection::Users);
    }
}
