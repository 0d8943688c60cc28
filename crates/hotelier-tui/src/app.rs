//! Application state for the hotelier terminal client.
//!
//! `App` owns the session context, the REST client and everything the views
//! draw: the current route, the admin guard state, the login form and the
//! paged listings behind each dashboard section.

use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::Result;
use tracing::{debug, error, info, warn};

use hotelier_core::api::{ApiClient, ApiError};
use hotelier_core::auth::{CredentialStore, GuardState, SessionContext};
use hotelier_core::config::Config;
use hotelier_core::models::{Category, GalleryItem, ListPage, Pagination, Room, User};
use hotelier_core::{AdminSection, Route};

use crate::edit::{EditForm, EditRequest};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for e-mail input.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for an edit form field.
const MAX_FIELD_LENGTH: usize = 500;

/// Description cells are cut to this many characters.
pub const DESCRIPTION_LIMIT: usize = 50;

/// Environment overrides for the login form.
const EMAIL_ENV: &str = "HOTELIER_EMAIL";
const PASSWORD_ENV: &str = "HOTELIER_PASSWORD";

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    EnteringPath,
    ConfirmingDelete,
    Editing,
    ConfirmingQuit,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Button,
            LoginFocus::Password => LoginFocus::Email,
            LoginFocus::Button => LoginFocus::Password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One-line message shown in the status bar until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// A delete waiting for the admin to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub section: AdminSection,
    /// E-mail for users, name for categories and gallery items.
    pub key: String,
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        format!(
            "Do you really want to delete the item \"{}\"? This action cannot be undone.",
            self.key
        )
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: SessionContext,
    pub api: ApiClient,

    // Navigation
    pub state: AppState,
    pub route: Route,
    pub guard_state: GuardState,
    pub path_input: String,

    // Login form state
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Dashboard data
    pub users: ListPage<User>,
    pub categories: ListPage<Category>,
    pub gallery: ListPage<GalleryItem>,
    pub rooms: Vec<Room>,
    pages: HashMap<AdminSection, Pagination>,
    pub selection: usize,
    pub pending_delete: Option<PendingDelete>,
    pub edit_form: Option<EditForm>,

    // Public pages
    pub public_categories: Vec<Category>,

    pub notice: Option<Notice>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = config.token_store()?;
        debug!(store = store.describe(), "Token store configured");
        let session = SessionContext::new(store);

        let backend_url = config.backend_url();
        debug!(%backend_url, "Backend configured");
        let mut api = ApiClient::new(&backend_url)?;
        if let Some(token) = session.bearer() {
            api.set_token(token);
        }

        let login_email = std::env::var(EMAIL_ENV)
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();

        let login_password = std::env::var(PASSWORD_ENV).ok().unwrap_or_else(|| {
            if !login_email.is_empty() && CredentialStore::has_credentials(&login_email) {
                CredentialStore::get_password(&login_email).unwrap_or_default()
            } else {
                String::new()
            }
        });

        Ok(Self {
            config,
            session,
            api,

            state: AppState::Normal,
            route: Route::Home,
            guard_state: GuardState::Loading,
            path_input: String::new(),

            login_email,
            login_password,
            login_focus: LoginFocus::Email,
            login_error: None,

            users: ListPage::default(),
            categories: ListPage::default(),
            gallery: ListPage::default(),
            rooms: Vec::new(),
            pages: HashMap::new(),
            selection: 0,
            pending_delete: None,
            edit_form: None,

            public_categories: Vec::new(),

            notice: None,
        })
    }

    // =========================================================================
    // Notices
    // =========================================================================

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
        });
    }

    fn notify_success(&mut self, text: impl Into<String>) {
        self.notify(NoticeKind::Success, text);
    }

    fn notify_error(&mut self, text: impl Into<String>) {
        self.notify(NoticeKind::Error, text);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch to `route`, running the admin guard first when it is protected.
    ///
    /// The guard starts from `Loading` on every entry so a token that
    /// expired since the last visit is caught.
    pub fn navigate(&mut self, route: Route) {
        self.selection = 0;
        self.guard_state = GuardState::Loading;
        self.route = route;

        if route == Route::Login {
            self.start_login();
        }
        if !route.requires_admin() {
            return;
        }

        let outcome = self.session.guard_admin();
        self.guard_state = self.guard_state.settle(outcome.decision);
        debug!(route = %route, state = ?self.guard_state, "Admin guard settled");

        match self.guard_state {
            GuardState::Redirected(target) => {
                if outcome.clear_token {
                    self.api.clear_token();
                }
                if let Some(text) = outcome.notice {
                    self.notify_error(text);
                }
                self.route = target;
                if target == Route::Login {
                    self.start_login();
                }
            }
            GuardState::Authenticated => {
                if let Some(token) = self.session.bearer() {
                    self.api.set_token(token);
                }
            }
            GuardState::Loading => {}
        }
    }

    /// Navigate and load whatever the new page shows.
    pub async fn open(&mut self, route: Route) {
        let entering_admin = route.requires_admin() && !self.route.requires_admin();
        self.navigate(route);

        if entering_admin && self.guard_state.may_render() {
            self.refresh_admin().await;
        } else {
            self.load_current().await;
        }
    }

    /// Navigate to a typed path such as `/admin/users`.
    pub async fn open_path(&mut self, path: &str) {
        match Route::parse(path) {
            Some(route) => self.open(route).await,
            None => {
                warn!(path, "Unknown path");
                self.notify_error(format!("No such page: {}", path.trim()));
            }
        }
    }

    pub fn start_login(&mut self) {
        self.route = Route::Login;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Name shown in the title bar.
    pub fn user_tag(&self) -> String {
        self.session
            .claims()
            .map(|c| c.display_name())
            .unwrap_or_else(|| "Guest".to_string())
    }

    pub fn current_section(&self) -> Option<AdminSection> {
        match self.route {
            Route::Admin(section) => Some(section),
            _ => None,
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Interactive login for `--login`.
    pub async fn login_interactive(&mut self) -> Result<()> {
        println!("\n=== Hotelier Login ===\n");

        let email = match self.config.last_email.clone() {
            Some(last) => {
                print!("E-mail [{}]: ", last);
                io::stdout().flush()?;
                let input = Self::read_line()?;
                if input.is_empty() {
                    last
                } else {
                    input
                }
            }
            None => {
                print!("E-mail: ");
                io::stdout().flush()?;
                Self::read_line()?
            }
        };

        let password = if CredentialStore::has_credentials(&email) {
            print!("Use stored password? [Y/n]: ");
            io::stdout().flush()?;
            if Self::read_line()?.to_lowercase() != "n" {
                CredentialStore::get_password(&email)?
            } else {
                rpassword::prompt_password("Password: ")?
            }
        } else {
            rpassword::prompt_password("Password: ")?
        };

        println!("\nAuthenticating...");

        let response = self.api.login(&email, &password).await?;
        let landing = self.session.login(&response)?;
        self.api.set_token(response.token.clone());

        CredentialStore::store(&email, &password)?;
        self.config.last_email = Some(email);
        self.config.save()?;

        println!("Login successful! Signed in as {} ({}).", response.user.email, response.user.role);
        println!("Landing page: {}\n", landing);
        Ok(())
    }

    fn read_line() -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();

        if email.is_empty() || password.is_empty() {
            self.login_error = Some("E-mail and password required".to_string());
            return Err(anyhow::anyhow!("E-mail and password required"));
        }

        self.login_error = None;

        let response = match self.api.login(&email, &password).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Login failed");
                self.login_error = Some(login_failure_message(&e));
                return Err(e);
            }
        };

        let landing = match self.session.login(&response) {
            Ok(route) => route,
            Err(e) => {
                error!(error = %e, "Failed to persist session");
                self.login_error = Some("Could not save the session".to_string());
                return Err(e);
            }
        };
        self.api.set_token(response.token.clone());

        if let Err(e) = CredentialStore::store(&email, &password) {
            warn!(error = %e, "Failed to store credentials");
        }
        self.config.last_email = Some(email);
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        self.login_password.clear();
        self.notice = None;
        info!(landing = %landing, "Login complete");
        self.open(landing).await;
        if self.notice.is_none() {
            self.notify_success(
                response
                    .message
                    .unwrap_or_else(|| "Login successful".to_string()),
            );
        }
        Ok(())
    }

    pub async fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            error!(error = %e, "Logout failed");
            self.notify_error("Failed to log out");
            return;
        }
        self.forget_credentials();
        self.api.clear_token();
        self.users = ListPage::default();
        self.categories = ListPage::default();
        self.gallery = ListPage::default();
        self.notify(NoticeKind::Info, "Logged out");
        self.open(Route::Home).await;
    }

    /// Drop the remembered password for the last e-mail, if any.
    pub fn forget_credentials(&mut self) {
        self.login_password.clear();
        let Some(email) = self.config.last_email.as_deref() else {
            return;
        };
        if let Err(e) = CredentialStore::delete(email) {
            warn!(error = %e, "Failed to delete stored credentials");
        }
    }

    /// Route an API failure: auth failures send the session back through the guard.
    fn handle_api_error(&mut self, e: &anyhow::Error, message: &str) {
        let auth_failure = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>())
            .map_or(false, ApiError::is_auth_failure);

        if auth_failure {
            warn!(error = %e, "Backend rejected the session");
            if self.session.guard_admin().decision.permits() {
                // Locally valid but refused upstream.
                if let Err(e) = self.session.logout() {
                    warn!(error = %e, "Failed to clear rejected token");
                }
                self.api.clear_token();
                self.notify_error("Session expired. Please log in again.");
                self.start_login();
            } else {
                self.navigate(self.route);
            }
        } else {
            error!(error = %e, "{}", message);
            self.notify_error(message);
        }
    }

    // =========================================================================
    // Data loading
    // =========================================================================

    pub fn pagination(&self, section: AdminSection) -> Pagination {
        self.pages.get(&section).copied().unwrap_or_default()
    }

    fn pagination_mut(&mut self, section: AdminSection) -> &mut Pagination {
        self.pages.entry(section).or_default()
    }

    /// Load the data the current page shows.
    pub async fn load_current(&mut self) {
        match self.route {
            Route::Admin(section) if self.guard_state.may_render() => {
                if let Err(e) = self.load_section(section).await {
                    self.handle_api_error(&e, &format!("Failed to fetch {}.", section.title().to_lowercase()));
                }
            }
            Route::Rooms => match self.api.fetch_rooms().await {
                Ok(rooms) => self.rooms = rooms,
                Err(e) => self.handle_api_error(&e, "Failed to fetch rooms."),
            },
            Route::Categories => match self.api.fetch_public_categories().await {
                Ok(categories) => self.public_categories = categories,
                Err(e) => self.handle_api_error(&e, "Failed to fetch categories."),
            },
            Route::Admin(_) | Route::Home | Route::Login => {}
        }
        self.clamp_selection();
    }

    async fn load_section(&mut self, section: AdminSection) -> Result<()> {
        let page = self.pagination(section);
        match section {
            AdminSection::Users => {
                let users = self.api.fetch_users(&page).await?;
                self.pagination_mut(section).set_total(users.total_count);
                self.users = users;
            }
            AdminSection::Categories => {
                let categories = self.api.fetch_categories(&page).await?;
                self.pagination_mut(section).set_total(categories.total_count);
                self.categories = categories;
            }
            AdminSection::GalleryItems => {
                let gallery = self.api.fetch_gallery(&page).await?;
                self.pagination_mut(section).set_total(gallery.total_count);
                self.gallery = gallery;
            }
            AdminSection::Rooms => {
                self.rooms = self.api.fetch_rooms().await?;
            }
            AdminSection::Bookings | AdminSection::Feedback | AdminSection::Tickets => {}
        }
        Ok(())
    }

    /// Fetch every dashboard listing concurrently.
    pub async fn refresh_admin(&mut self) {
        if !self.guard_state.may_render() || !self.api.has_token() {
            return;
        }
        self.notify(NoticeKind::Info, "Refreshing...");

        let users_page = self.pagination(AdminSection::Users);
        let categories_page = self.pagination(AdminSection::Categories);
        let gallery_page = self.pagination(AdminSection::GalleryItems);

        let (users, categories, gallery, rooms) = futures::join!(
            self.api.fetch_users(&users_page),
            self.api.fetch_categories(&categories_page),
            self.api.fetch_gallery(&gallery_page),
            self.api.fetch_rooms(),
        );

        let mut failure = None;
        match users {
            Ok(page) => {
                self.pagination_mut(AdminSection::Users).set_total(page.total_count);
                self.users = page;
            }
            Err(e) => failure = Some((e, "Failed to fetch users.")),
        }
        match categories {
            Ok(page) => {
                self.pagination_mut(AdminSection::Categories).set_total(page.total_count);
                self.categories = page;
            }
            Err(e) => failure = Some((e, "Failed to fetch categories.")),
        }
        match gallery {
            Ok(page) => {
                self.pagination_mut(AdminSection::GalleryItems).set_total(page.total_count);
                self.gallery = page;
            }
            Err(e) => failure = Some((e, "Failed to fetch gallery items.")),
        }
        match rooms {
            Ok(rooms) => self.rooms = rooms,
            Err(e) => failure = Some((e, "Failed to fetch rooms.")),
        }

        match failure {
            Some((e, message)) => self.handle_api_error(&e, message),
            None => self.notice = None,
        }
        self.clamp_selection();
    }

    // =========================================================================
    // Selection and paging
    // =========================================================================

    pub fn row_count(&self) -> usize {
        match self.route {
            Route::Admin(AdminSection::Users) => self.users.items.len(),
            Route::Admin(AdminSection::Categories) => self.categories.items.len(),
            Route::Admin(AdminSection::GalleryItems) => self.gallery.items.len(),
            Route::Admin(AdminSection::Rooms) | Route::Rooms => self.rooms.len(),
            Route::Categories => self.public_categories.len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let count = self.row_count();
        if count > 0 && self.selection + 1 < count {
            self.selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.row_count();
        if self.selection >= count {
            self.selection = count.saturating_sub(1);
        }
    }

    /// Apply `change` to the current section's pagination and reload if it moved.
    pub async fn change_page<F>(&mut self, change: F)
    where
        F: FnOnce(&mut Pagination) -> bool,
    {
        let Some(section) = self.current_section() else {
            return;
        };
        if !section.has_backend() || section == AdminSection::Rooms {
            return;
        }
        if change(self.pagination_mut(section)) {
            self.selection = 0;
            self.load_current().await;
        }
    }

    pub async fn cycle_page_size(&mut self) {
        self.change_page(|page| {
            page.cycle_page_size();
            true
        })
        .await;
    }

    // =========================================================================
    // Row actions
    // =========================================================================

    /// E-mail or name identifying the selected row in the current section.
    pub fn selected_key(&self) -> Option<(AdminSection, String)> {
        let section = self.current_section()?;
        let key = match section {
            AdminSection::Users => self.users.items.get(self.selection)?.email.clone(),
            AdminSection::Categories => self.categories.items.get(self.selection)?.name.clone(),
            AdminSection::GalleryItems => self.gallery.items.get(self.selection)?.name.clone(),
            _ => return None,
        };
        Some((section, key))
    }

    /// Flip the disabled flag of the selected row, updating it in place.
    pub async fn toggle_selected(&mut self) {
        if !self.guard_state.may_render() {
            return;
        }
        let Some((section, key)) = self.selected_key() else {
            return;
        };

        match section {
            AdminSection::Users => match self.api.toggle_user_disabled(&key).await {
                Ok(disabled) => {
                    self.users.replace_where(|u| u.email == key, |u| u.disabled = disabled);
                    let state = if disabled { "disabled" } else { "enabled" };
                    self.notify_success(format!("User status has been {}.", state));
                }
                Err(e) => self.handle_api_error(&e, "Failed to update user status."),
            },
            AdminSection::Categories => match self.api.toggle_category_disabled(&key).await {
                Ok(disabled) => {
                    self.categories
                        .replace_where(|c| c.name == key, |c| c.disabled = disabled);
                    self.notify_success("Category status has been updated.");
                }
                Err(e) => self.handle_api_error(&e, "Failed to update category status."),
            },
            AdminSection::GalleryItems => match self.api.toggle_gallery_item_disabled(&key).await {
                Ok(disabled) => {
                    self.gallery.replace_where(|g| g.name == key, |g| g.disabled = disabled);
                    self.notify_success("Gallery item status has been updated.");
                }
                Err(e) => self.handle_api_error(&e, "Failed to update gallery item status."),
            },
            _ => {}
        }
    }

    /// Block or unblock the selected user.
    pub async fn toggle_block_selected(&mut self) {
        if !self.guard_state.may_render() {
            return;
        }
        let Some((AdminSection::Users, email)) = self.selected_key() else {
            return;
        };
        let currently_blocked = self
            .users
            .items
            .get(self.selection)
            .map_or(false, |u| u.blocked);

        match self.api.set_user_blocked(&email, !currently_blocked).await {
            Ok(blocked) => {
                self.users.replace_where(|u| u.email == email, |u| u.blocked = blocked);
                let state = if blocked { "blocked" } else { "unblocked" };
                self.notify_success(format!("User has been {} successfully.", state));
            }
            Err(e) => self.handle_api_error(&e, "Failed to update user block status."),
        }
    }

    pub fn request_delete(&mut self) {
        if !self.guard_state.may_render() {
            return;
        }
        if let Some((section, key)) = self.selected_key() {
            self.pending_delete = Some(PendingDelete { section, key });
            self.state = AppState::ConfirmingDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.state = AppState::Normal;
    }

    pub async fn confirm_delete(&mut self) {
        self.state = AppState::Normal;
        let Some(pending) = self.pending_delete.take() else {
            return;
        };

        let (result, done, failed) = match pending.section {
            AdminSection::Users => (
                self.api.delete_user(&pending.key).await,
                "The user has been deleted.",
                "Failed to delete user.",
            ),
            AdminSection::Categories => (
                self.api.delete_category(&pending.key).await,
                "The category has been deleted.",
                "Failed to delete category.",
            ),
            AdminSection::GalleryItems => (
                self.api.delete_gallery_item(&pending.key).await,
                "The gallery item has been deleted.",
                "Failed to delete gallery item.",
            ),
            _ => return,
        };

        match result {
            Ok(()) => {
                info!(section = pending.section.slug(), key = %pending.key, "Deleted");
                self.load_current().await;
                self.notify_success(done);
            }
            Err(e) => self.handle_api_error(&e, failed),
        }
    }

    // =========================================================================
    // Edit form
    // =========================================================================

    /// Open the edit form for the selected row.
    pub fn request_edit(&mut self) {
        if !self.guard_state.may_render() {
            return;
        }
        let form = match self.current_section() {
            Some(AdminSection::Users) => self.users.items.get(self.selection).map(EditForm::for_user),
            Some(AdminSection::Categories) => self
                .categories
                .items
                .get(self.selection)
                .map(EditForm::for_category),
            Some(AdminSection::GalleryItems) => self
                .gallery
                .items
                .get(self.selection)
                .map(EditForm::for_gallery_item),
            _ => None,
        };
        if let Some(form) = form {
            self.edit_form = Some(form);
            self.state = AppState::Editing;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_form = None;
        self.state = AppState::Normal;
    }

    /// Re-run the admin guard on the current route, keeping the selection
    /// when access still holds.
    fn recheck_guard(&mut self) -> bool {
        let selection = self.selection;
        self.navigate(self.route);
        if self.guard_state.may_render() {
            self.selection = selection;
            true
        } else {
            false
        }
    }

    /// Validate the form and send it. Invalid input keeps the form open
    /// with its errors.
    pub async fn submit_edit(&mut self) {
        let Some(form) = self.edit_form.as_mut() else {
            self.state = AppState::Normal;
            return;
        };
        let request = match form.request() {
            Ok(request) => request,
            Err(errors) => {
                form.errors = errors;
                self.notify_error("Please correct the errors before submitting.");
                return;
            }
        };
        form.errors.clear();

        if !self.recheck_guard() {
            self.cancel_edit();
            return;
        }

        let (result, done, failed) = match &request {
            EditRequest::User { email, update } => (
                self.api.update_user(email, update).await,
                "User updated successfully!",
                "Failed to update user. Please try again.",
            ),
            EditRequest::Category(update) => (
                self.api.update_category(update).await,
                "Category updated successfully.",
                "Error submitting category, please try again.",
            ),
            EditRequest::GalleryItem(update) => (
                self.api.update_gallery_item(update).await,
                "Gallery item updated successfully!",
                "Failed to update gallery item. Please try again.",
            ),
        };

        match result {
            Ok(message) => {
                info!(section = ?self.current_section(), "Updated");
                self.cancel_edit();
                self.load_current().await;
                self.notify_success(message.unwrap_or_else(|| done.to_string()));
            }
            Err(e) => {
                self.handle_api_error(&e, failed);
                if !self.route.requires_admin() || !self.guard_state.may_render() {
                    self.cancel_edit();
                }
            }
        }
    }
}

/// Map a login failure to something a person can act on.
fn login_failure_message(e: &anyhow::Error) -> String {
    match e.chain().find_map(|cause| cause.downcast_ref::<ApiError>()) {
        Some(ApiError::Unauthorized) | Some(ApiError::AccessDenied(_)) => {
            "Invalid e-mail or password".to_string()
        }
        Some(ApiError::NotFound(message)) => message.clone(),
        Some(ApiError::NetworkError(err)) if err.is_timeout() => {
            "Connection timed out. Please try again.".to_string()
        }
        Some(ApiError::NetworkError(_)) => {
            "Unable to connect to server. Check that the backend is running.".to_string()
        }
        _ => format!("Login failed: {}", e),
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

pub fn can_add_path_char(c: char) -> bool {
    is_valid_input_char(c) && !c.is_whitespace()
}

pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
