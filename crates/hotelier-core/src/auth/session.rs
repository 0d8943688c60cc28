use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::user::landing_route;
use crate::models::LoginResponse;
use crate::routes::Route;

use super::clock::{Clock, SystemClock};
use super::guard::{GuardOutcome, SessionGuard};
use super::store::TokenStore;
use super::token::{decode_claims, Claims, Role};

/// The client's session: a token store, a clock and the admin guard.
///
/// Front ends hold one of these and pass it where a view needs to know who
/// is signed in; nothing reads the token from a global.
pub struct SessionContext {
    store: Box<dyn TokenStore>,
    clock: Box<dyn Clock>,
    guard: SessionGuard,
}

impl SessionContext {
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: Box<dyn TokenStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            guard: SessionGuard::admin(),
        }
    }

    pub fn with_guard(mut self, guard: SessionGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// Stored token, or `None` when absent or unreadable.
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, store = self.store.describe(), "Failed to read stored token");
                None
            }
        }
    }

    /// Token to send as `Authorization: Bearer`.
    pub fn bearer(&self) -> Option<String> {
        self.token()
    }

    /// Claims of the stored token if it decodes and has not expired.
    pub fn claims(&self) -> Option<Claims> {
        let claims = decode_claims(&self.token()?).ok()?;
        (!claims.is_expired_at(self.clock.now())).then_some(claims)
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().map(|c| c.role)
    }

    pub fn is_signed_in(&self) -> bool {
        self.claims().is_some()
    }

    /// Persist the token from a successful login and return where to go.
    pub fn login(&self, response: &LoginResponse) -> Result<Route> {
        self.store
            .save(&response.token)
            .context("Failed to save session token")?;

        let route = landing_route(&response.user.role);
        info!(role = %response.user.role, landing = %route, "Login successful");
        Ok(route)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear().context("Failed to clear session token")?;
        info!("Logged out");
        Ok(())
    }

    /// The admin guard's verdict on the stored token. Never touches the store.
    pub fn inspect_admin(&self) -> GuardOutcome {
        let token = self.token();
        self.guard.inspect(token.as_deref(), self.clock.now())
    }

    /// Run the admin guard against the stored token.
    ///
    /// Applies the guard's cleanup policy; the redirect itself is left to
    /// the caller.
    pub fn guard_admin(&self) -> GuardOutcome {
        let outcome = self.inspect_admin();

        if outcome.clear_token {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "Failed to clear invalid token");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::super::clock::FixedClock;
    use super::super::guard::{ClearPolicy, GuardDecision, GuardState};
    use super::super::store::MemoryTokenStore;
    use super::super::token::test_support::token_for;
    use super::*;

    /// Shares one store between the context under test and the assertions.
    struct SharedStore(Arc<MemoryTokenStore>);

    impl TokenStore for SharedStore {
        fn load(&self) -> Result<Option<String>> {
            self.0.load()
        }
        fn save(&self, token: &str) -> Result<()> {
            self.0.save(token)
        }
        fn clear(&self) -> Result<()> {
            self.0.clear()
        }
        fn describe(&self) -> &'static str {
            "shared"
        }
    }

    struct BrokenStore;

    impl TokenStore for BrokenStore {
        fn load(&self) -> Result<Option<String>> {
            Err(anyhow::anyhow!("disk on fire"))
        }
        fn save(&self, _token: &str) -> Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
        fn clear(&self) -> Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
        fn describe(&self) -> &'static str {
            "broken"
        }
    }

    fn context_with(token: Option<String>) -> (SessionContext, Arc<MemoryTokenStore>) {
        let store = Arc::new(match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        });
        let ctx = SessionContext::new(Box::new(SharedStore(store.clone())));
        (ctx, store)
    }

    fn login_response(role: &str, exp: i64) -> LoginResponse {
        let json = serde_json::json!({
            "token": token_for(exp, role),
            "user": { "email": "someone@example.com", "type": role }
        });
        serde_json::from_value(json).expect("valid login response")
    }

    #[test]
    fn test_login_admin_lands_on_dashboard() {
        let (ctx, store) = context_with(None);
        let resp = login_response("admin", Utc::now().timestamp() + 3600);

        let route = ctx.login(&resp).expect("login");
        assert_eq!(route, Route::ADMIN);
        assert_eq!(store.load().expect("load"), Some(resp.token.clone()));
        assert_eq!(ctx.guard_admin().state(), GuardState::Authenticated);
        assert_eq!(ctx.role(), Some(Role::Admin));
    }

    #[test]
    fn test_login_customer_lands_home() {
        let (ctx, _) = context_with(None);
        let resp = login_response("customer", Utc::now().timestamp() + 3600);

        assert_eq!(ctx.login(&resp).expect("login"), Route::Home);
        assert!(ctx.is_signed_in());
        assert_eq!(ctx.guard_admin().state(), GuardState::Redirected(Route::Home));
    }

    #[test]
    fn test_logout_clears_token() {
        let (ctx, store) = context_with(Some(token_for(Utc::now().timestamp() + 60, "admin")));
        ctx.logout().expect("logout");
        assert_eq!(store.load().expect("load"), None);
        assert_eq!(ctx.guard_admin().decision, GuardDecision::Unauthenticated);
    }

    #[test]
    fn test_malformed_token_is_cleared() {
        let (ctx, store) = context_with(Some("not-a-jwt".to_string()));
        let outcome = ctx.guard_admin();
        assert_eq!(outcome.state(), GuardState::Redirected(Route::Login));
        assert_eq!(outcome.notice, Some("Invalid token. Please log in again."));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_inspect_admin_leaves_store_alone() {
        let expired = token_for(Utc::now().timestamp() - 60, "admin");
        let (ctx, store) = context_with(Some(expired.clone()));

        let outcome = ctx.inspect_admin();
        assert_eq!(outcome.decision, GuardDecision::Expired);
        assert!(outcome.clear_token);
        assert_eq!(store.load().expect("load"), Some(expired));

        ctx.guard_admin();
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_never_policy_keeps_malformed_token() {
        let (ctx, store) = context_with(Some("not-a-jwt".to_string()));
        let ctx = ctx.with_guard(SessionGuard::admin().with_clear_policy(ClearPolicy::Never));
        ctx.guard_admin();
        assert_eq!(store.load().expect("load").as_deref(), Some("not-a-jwt"));
    }

    #[test]
    fn test_token_expires_between_mounts() {
        let start = Utc::now();
        let clock = Arc::new(FixedClock::new(start));
        let store = Arc::new(MemoryTokenStore::with_token(token_for(
            start.timestamp() + 60,
            "admin",
        )));

        struct SharedClock(Arc<FixedClock>);
        impl Clock for SharedClock {
            fn now(&self) -> chrono::DateTime<Utc> {
                self.0.now()
            }
        }

        let ctx = SessionContext::with_clock(
            Box::new(SharedStore(store.clone())),
            Box::new(SharedClock(clock.clone())),
        );

        assert_eq!(ctx.guard_admin().decision, GuardDecision::Valid);
        clock.advance(Duration::seconds(61));
        let outcome = ctx.guard_admin();
        assert_eq!(outcome.decision, GuardDecision::Expired);
        assert_eq!(outcome.redirect(), Some(Route::Login));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_unreadable_store_counts_as_no_token() {
        let ctx = SessionContext::new(Box::new(BrokenStore));
        assert_eq!(ctx.token(), None);
        let outcome = ctx.guard_admin();
        assert_eq!(outcome.decision, GuardDecision::Unauthenticated);
        assert!(ctx.logout().is_err());
    }
}
