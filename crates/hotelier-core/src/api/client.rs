//! API client for the hotel REST backend.
//!
//! Public listings (rooms, categories) need no token; everything under the
//! admin dashboard sends the stored bearer token.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionToken;
use crate::models::{
    Category, CategoryUpdate, GalleryItem, GalleryItemUpdate, ListPage, LoginResponse, Pagination,
    Room, User, UserUpdate,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Reason sent to the backend when an admin blocks a user.
const BLOCK_REASON: &str = "Admin blocked the user";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct BlockRequest<'a> {
    reason: &'a str,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: Vec<User>,
    #[serde(rename = "totalCount", default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(rename = "totalCount", default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct GalleryResponse {
    #[serde(default, alias = "galleryItems", alias = "list")]
    items: Vec<GalleryItem>,
    #[serde(rename = "totalCount", default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct RoomsResponse {
    #[serde(default)]
    rooms: Vec<Room>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusFlags {
    #[serde(default)]
    disabled: Option<bool>,
    #[serde(default)]
    blocked: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserFlagsResponse {
    user: StatusFlags,
}

#[derive(Debug, Deserialize)]
struct CategoryFlagsResponse {
    category: StatusFlags,
}

#[derive(Debug, Deserialize)]
struct GalleryFlagsResponse {
    #[serde(rename = "galleryItem")]
    gallery_item: StatusFlags,
}

/// API client for the hotel backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<SessionToken>,
}

impl ApiClient {
    /// Create a new API client for the backend at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(SessionToken::new(token));
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(response: reqwest::Response) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Send a request, backing off and retrying while rate limited.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let mut request = self
                .client
                .request(method.clone(), url)
                .headers(self.auth_headers()?);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(ApiError::NetworkError)
                .with_context(|| format!("Failed to send {} request to {}", method, url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => return Ok(response),
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }

    async fn json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.send(method, url, query, body).await?;
        let text = response
            .text()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to read response body from {}", url))?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        self.json::<T, ()>(Method::GET, url, query, None).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> Result<T> {
        self.json(Method::PATCH, url, &[], Some(body)).await
    }

    /// PUT a body. Returns the backend's `message`, if any.
    async fn put<B: Serialize>(&self, url: &str, body: &B) -> Result<Option<String>> {
        let response = self.send(Method::PUT, url, &[], Some(body)).await?;
        let text = response
            .text()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to read response body from {}", url))?;
        let resp: MessageResponse = serde_json::from_str(&text).unwrap_or_default();
        Ok(resp.message)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, url, &[], None).await?;
        Ok(())
    }

    fn page_query(page: &Pagination) -> [(&'static str, String); 2] {
        [
            ("pageIndex", page.page_index.to_string()),
            ("pageSize", page.page_size.to_string()),
        ]
    }

    // ===== Authentication =====

    /// Exchange e-mail and password for a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.endpoint("users/login");
        let body = LoginRequest { email, password };
        let response: LoginResponse = self
            .json(Method::POST, &url, &[], Some(&body))
            .await
            .context("Login request failed")?;
        debug!(role = %response.user.role, "Login response received");
        Ok(response)
    }

    // ===== Users =====

    pub async fn fetch_users(&self, page: &Pagination) -> Result<ListPage<User>> {
        let url = self.endpoint("users");
        let resp: UsersResponse = self.get(&url, &Self::page_query(page)).await?;
        Ok(ListPage {
            items: resp.users,
            total_count: resp.total_count,
        })
    }

    fn user_url(&self, email: &str, action: Option<&str>) -> String {
        let base = self.endpoint(&format!("users/{}", urlencoding::encode(email)));
        match action {
            Some(action) => format!("{}/{}", base, action),
            None => base,
        }
    }

    pub async fn delete_user(&self, email: &str) -> Result<()> {
        self.delete(&self.user_url(email, None))
            .await
            .context("Failed to delete user")
    }

    /// Flip a user's disabled flag. Returns the new value.
    pub async fn toggle_user_disabled(&self, email: &str) -> Result<bool> {
        let resp: UserFlagsResponse = self
            .patch(&self.user_url(email, Some("toggle")), &serde_json::json!({}))
            .await
            .context("Failed to update user status")?;
        resp.user
            .disabled
            .ok_or_else(|| ApiError::InvalidResponse("missing user.disabled".into()).into())
    }

    /// Block or unblock a user. Returns the new blocked flag.
    pub async fn set_user_blocked(&self, email: &str, block: bool) -> Result<bool> {
        let resp: UserFlagsResponse = if block {
            self.patch::<UserFlagsResponse, _>(
                &self.user_url(email, Some("block")),
                &BlockRequest { reason: BLOCK_REASON },
            )
            .await
        } else {
            self.patch::<UserFlagsResponse, _>(
                &self.user_url(email, Some("unblock")),
                &serde_json::json!({}),
            )
            .await
        }
        .context("Failed to update blocked status")?;

        resp.user
            .blocked
            .ok_or_else(|| ApiError::InvalidResponse("missing user.blocked".into()).into())
    }

    /// Update a user's profile, keeping whatever image the body carries
    pub async fn update_user(&self, email: &str, update: &UserUpdate) -> Result<Option<String>> {
        self.put(&self.user_url(email, None), update)
            .await
            .context("Failed to update user")
    }

    // ===== Categories =====

    pub async fn fetch_categories(&self, page: &Pagination) -> Result<ListPage<Category>> {
        let url = self.endpoint("categories");
        let resp: CategoriesResponse = self.get(&url, &Self::page_query(page)).await?;
        Ok(ListPage {
            items: resp.categories,
            total_count: resp.total_count,
        })
    }

    /// Unpaged category listing for the public site
    pub async fn fetch_public_categories(&self) -> Result<Vec<Category>> {
        let url = self.endpoint("categories");
        let resp: CategoriesResponse = self.get(&url, &[]).await?;
        Ok(resp.categories)
    }

    fn named_url(&self, collection: &str, name: &str, action: Option<&str>) -> String {
        let base = self.endpoint(&format!("{}/{}", collection, urlencoding::encode(name)));
        match action {
            Some(action) => format!("{}/{}", base, action),
            None => base,
        }
    }

    pub async fn toggle_category_disabled(&self, name: &str) -> Result<bool> {
        let resp: CategoryFlagsResponse = self
            .patch(&self.named_url("categories", name, Some("toggle")), &serde_json::json!({}))
            .await
            .context("Failed to update category status")?;
        resp.category
            .disabled
            .ok_or_else(|| ApiError::InvalidResponse("missing category.disabled".into()).into())
    }

    pub async fn delete_category(&self, name: &str) -> Result<()> {
        self.delete(&self.named_url("categories", name, None))
            .await
            .context("Failed to delete category")
    }

    pub async fn update_category(&self, update: &CategoryUpdate) -> Result<Option<String>> {
        self.put(&self.named_url("categories", &update.name, None), update)
            .await
            .context("Failed to update category")
    }

    // ===== Gallery =====

    pub async fn fetch_gallery(&self, page: &Pagination) -> Result<ListPage<GalleryItem>> {
        let url = self.endpoint("gallery");
        let resp: GalleryResponse = self.get(&url, &Self::page_query(page)).await?;
        Ok(ListPage {
            items: resp.items,
            total_count: resp.total_count,
        })
    }

    pub async fn toggle_gallery_item_disabled(&self, name: &str) -> Result<bool> {
        let resp: GalleryFlagsResponse = self
            .patch(&self.named_url("gallery", name, Some("toggle")), &serde_json::json!({}))
            .await
            .context("Failed to update gallery item status")?;
        resp.gallery_item
            .disabled
            .ok_or_else(|| ApiError::InvalidResponse("missing galleryItem.disabled".into()).into())
    }

    pub async fn delete_gallery_item(&self, name: &str) -> Result<()> {
        self.delete(&self.named_url("gallery", name, None))
            .await
            .context("Failed to delete gallery item")
    }

    pub async fn update_gallery_item(&self, update: &GalleryItemUpdate) -> Result<Option<String>> {
        self.put(&self.named_url("gallery", &update.name, None), update)
            .await
            .context("Failed to update gallery item")
    }

    // ===== Rooms =====

    pub async fn fetch_rooms(&self) -> Result<Vec<Room>> {
        let url = self.endpoint("rooms");
        let resp: RoomsResponse = self.get(&url, &[]).await?;
        Ok(resp.rooms)
    }
}
