//! Admin session guard.
//!
//! The decision itself is pure: given a token (or none) and an instant it
//! says whether an admin view may render. Navigation and token cleanup are
//! applied by the caller from the returned [`GuardOutcome`].

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::routes::Route;

use super::token::{decode_claims, Claims, Role};
use super::AuthError;

/// Result of inspecting a token against the required role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Unauthenticated,
    Expired,
    WrongRole,
    Valid,
}

impl GuardDecision {
    /// Where the user goes instead of the protected view. `None` means render.
    pub fn redirect(&self) -> Option<Route> {
        match self {
            GuardDecision::Unauthenticated | GuardDecision::Expired => Some(Route::Login),
            GuardDecision::WrongRole => Some(Route::Home),
            GuardDecision::Valid => None,
        }
    }

    pub fn permits(&self) -> bool {
        matches!(self, GuardDecision::Valid)
    }
}

/// Check a token for access by `required`, returning its claims when allowed.
///
/// Order matters: an expired token is reported as expired whatever its role.
pub fn check(token: Option<&str>, now: DateTime<Utc>, required: &Role) -> Result<Claims, AuthError> {
    let token = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AuthError::MissingToken),
    };

    let claims = decode_claims(token)?;

    if claims.is_expired_at(now) {
        return Err(AuthError::ExpiredToken {
            expired_at: claims.exp_seconds(),
        });
    }

    if &claims.role != required {
        return Err(AuthError::InsufficientRole {
            role: claims.role.to_string(),
        });
    }

    Ok(claims)
}

/// Decide whether an admin-only view may render for `token` at `now`.
pub fn evaluate(token: Option<&str>, now: DateTime<Utc>) -> GuardDecision {
    evaluate_for(token, now, &Role::Admin)
}

pub fn evaluate_for(token: Option<&str>, now: DateTime<Utc>, required: &Role) -> GuardDecision {
    match check(token, now, required) {
        Ok(_) => GuardDecision::Valid,
        Err(e) => e.decision(),
    }
}

/// Per-mount guard state. Starts `Loading` and settles exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authenticated,
    Redirected(Route),
}

impl GuardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, GuardState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, GuardState::Authenticated)
    }

    /// Protected content may render only when authenticated and not loading.
    pub fn may_render(&self) -> bool {
        !self.is_loading() && self.is_authenticated()
    }

    /// Apply a decision. Settled states are terminal for the mount.
    pub fn settle(self, decision: GuardDecision) -> GuardState {
        match self {
            GuardState::Loading => match decision.redirect() {
                None => GuardState::Authenticated,
                Some(route) => GuardState::Redirected(route),
            },
            settled => settled,
        }
    }
}

/// When the guard discards the stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    /// Keep whatever is stored.
    Never,
    /// Drop malformed and expired tokens; a valid customer token survives.
    #[default]
    Invalid,
    /// Drop the token on any refusal.
    AnyRefusal,
}

/// What the caller should do after a guard check.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardOutcome {
    pub decision: GuardDecision,
    pub claims: Option<Claims>,
    pub notice: Option<&'static str>,
    pub clear_token: bool,
}

impl GuardOutcome {
    pub fn state(&self) -> GuardState {
        GuardState::Loading.settle(self.decision)
    }

    pub fn redirect(&self) -> Option<Route> {
        self.decision.redirect()
    }
}

/// Guard configuration: required role and cleanup policy.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    required: Role,
    clear_policy: ClearPolicy,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::admin()
    }
}

impl SessionGuard {
    pub fn admin() -> Self {
        Self {
            required: Role::Admin,
            clear_policy: ClearPolicy::default(),
        }
    }

    pub fn with_clear_policy(mut self, policy: ClearPolicy) -> Self {
        self.clear_policy = policy;
        self
    }

    pub fn clear_policy(&self) -> ClearPolicy {
        self.clear_policy
    }

    /// Inspect a token and describe the required follow-up.
    pub fn inspect(&self, token: Option<&str>, now: DateTime<Utc>) -> GuardOutcome {
        match check(token, now, &self.required) {
            Ok(claims) => {
                debug!(role = %claims.role, exp = claims.exp, "Session guard passed");
                GuardOutcome {
                    decision: GuardDecision::Valid,
                    claims: Some(claims),
                    notice: None,
                    clear_token: false,
                }
            }
            Err(e) => {
                let decision = e.decision();
                match &e {
                    AuthError::MalformedToken(_) => warn!(error = %e, "Token decoding error"),
                    _ => info!(reason = %e, ?decision, "Session guard refused access"),
                }

                let clear_token = match self.clear_policy {
                    ClearPolicy::Never => false,
                    ClearPolicy::Invalid => e.invalidates_token(),
                    ClearPolicy::AnyRefusal => !matches!(e, AuthError::MissingToken),
                };

                GuardOutcome {
                    decision,
                    claims: None,
                    notice: Some(e.notice()),
                    clear_token,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::super::token::test_support::{token_for, token_with_payload};
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_absent_token_is_unauthenticated() {
        assert_eq!(evaluate(None, now()), GuardDecision::Unauthenticated);
        assert_eq!(evaluate(Some(""), now()), GuardDecision::Unauthenticated);
        assert_eq!(evaluate(Some("   "), now()), GuardDecision::Unauthenticated);
    }

    #[test]
    fn test_malformed_token_is_unauthenticated() {
        assert_eq!(evaluate(Some("garbage"), now()), GuardDecision::Unauthenticated);
        assert_eq!(evaluate(Some("x.y.z"), now()), GuardDecision::Unauthenticated);
        let missing_exp = token_with_payload(&serde_json::json!({ "type": "admin" }));
        assert_eq!(evaluate(Some(&missing_exp), now()), GuardDecision::Unauthenticated);
    }

    #[test]
    fn test_past_expiry_is_expired_regardless_of_role() {
        let t = now();
        for role in ["admin", "customer", "staff"] {
            let token = token_for(t.timestamp() - 10, role);
            assert_eq!(evaluate(Some(&token), t), GuardDecision::Expired, "role {}", role);
        }
    }

    #[test]
    fn test_expiry_equal_to_now_is_expired() {
        let t = now();
        let token = token_for(t.timestamp(), "admin");
        assert_eq!(evaluate(Some(&token), t), GuardDecision::Expired);
    }

    #[test]
    fn test_future_expiry_wrong_role() {
        let t = now();
        let token = token_for(t.timestamp() + 3600, "customer");
        assert_eq!(evaluate(Some(&token), t), GuardDecision::WrongRole);
        assert_eq!(GuardDecision::WrongRole.redirect(), Some(Route::Home));
    }

    #[test]
    fn test_future_expiry_admin_is_valid() {
        let t = now();
        let token = token_for(t.timestamp() + 3600, "admin");
        assert_eq!(evaluate(Some(&token), t), GuardDecision::Valid);
        assert_eq!(GuardDecision::Valid.redirect(), None);
    }

    #[test]
    fn test_fractional_expiry_admin_is_valid() {
        let t = now();
        let exp = t.timestamp() as f64 + 3600.5;
        let token = token_with_payload(&serde_json::json!({ "exp": exp, "type": "admin" }));
        assert_eq!(evaluate(Some(&token), t), GuardDecision::Valid);

        let stale = token_with_payload(&serde_json::json!({ "exp": exp - 7200.0, "type": "admin" }));
        assert_eq!(evaluate(Some(&stale), t), GuardDecision::Expired);
    }

    #[test]
    fn test_payload_with_type_and_role_is_valid() {
        let t = now();
        let token = token_with_payload(&serde_json::json!({
            "exp": t.timestamp() + 3600,
            "type": "admin",
            "role": "admin"
        }));
        let outcome = SessionGuard::admin().inspect(Some(&token), t);
        assert_eq!(outcome.decision, GuardDecision::Valid);
        assert!(!outcome.clear_token);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let t = now();
        for token in [
            None,
            Some("junk".to_string()),
            Some(token_for(t.timestamp() - 1, "admin")),
            Some(token_for(t.timestamp() + 60, "customer")),
            Some(token_for(t.timestamp() + 60, "admin")),
        ] {
            let first = evaluate(token.as_deref(), t);
            let second = evaluate(token.as_deref(), t);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_check_returns_claims_and_errors() {
        let t = now();
        let admin = token_for(t.timestamp() + 60, "admin");
        let claims = check(Some(&admin), t, &Role::Admin).expect("admin token passes");
        assert_eq!(claims.role, Role::Admin);

        let customer = token_for(t.timestamp() + 60, "customer");
        assert_eq!(
            check(Some(&customer), t, &Role::Admin),
            Err(AuthError::InsufficientRole { role: "customer".to_string() })
        );

        let stale = token_for(t.timestamp() - 10, "admin");
        assert_eq!(
            check(Some(&stale), t, &Role::Admin),
            Err(AuthError::ExpiredToken { expired_at: t.timestamp() - 10 })
        );
    }

    #[test]
    fn test_scenario_expired_admin_goes_to_login() {
        let t = now();
        let token = token_for((t - Duration::seconds(10)).timestamp(), "admin");
        let outcome = SessionGuard::admin().inspect(Some(&token), t);
        assert_eq!(outcome.decision, GuardDecision::Expired);
        assert_eq!(outcome.state(), GuardState::Redirected(Route::Login));
        assert_eq!(outcome.notice, Some("Session expired. Please log in again."));
    }

    #[test]
    fn test_scenario_customer_goes_home() {
        let t = now();
        let token = token_for(t.timestamp() + 3600, "customer");
        let outcome = SessionGuard::admin().inspect(Some(&token), t);
        assert_eq!(outcome.state(), GuardState::Redirected(Route::Home));
        assert_eq!(outcome.notice, Some("You must be an admin to access this page."));
        assert!(!outcome.clear_token);
    }

    #[test]
    fn test_scenario_no_token_goes_to_login() {
        let outcome = SessionGuard::admin().inspect(None, now());
        assert_eq!(outcome.state(), GuardState::Redirected(Route::Login));
        assert_eq!(outcome.notice, Some("Authentication required. Please log in."));
        assert!(!outcome.clear_token);
    }

    #[test]
    fn test_scenario_admin_renders() {
        let t = now();
        let token = token_for(t.timestamp() + 3600, "admin");
        let outcome = SessionGuard::admin().inspect(Some(&token), t);
        let state = outcome.state();
        assert!(state.may_render());
        assert!(outcome.claims.is_some());
        assert_eq!(outcome.notice, None);
    }

    #[test]
    fn test_clear_policy() {
        let t = now();
        let customer = token_for(t.timestamp() + 3600, "customer");
        let expired = token_for(t.timestamp() - 5, "admin");

        let default = SessionGuard::admin();
        assert!(default.inspect(Some("junk"), t).clear_token);
        assert!(default.inspect(Some(&expired), t).clear_token);
        assert!(!default.inspect(Some(&customer), t).clear_token);

        let never = SessionGuard::admin().with_clear_policy(ClearPolicy::Never);
        assert!(!never.inspect(Some("junk"), t).clear_token);

        let strict = SessionGuard::admin().with_clear_policy(ClearPolicy::AnyRefusal);
        assert!(strict.inspect(Some(&customer), t).clear_token);
        assert!(!strict.inspect(None, t).clear_token);
    }

    #[test]
    fn test_guard_state_never_renders_while_loading() {
        let loading = GuardState::Loading;
        assert!(loading.is_loading());
        assert!(!loading.may_render());

        let redirected = GuardState::Loading.settle(GuardDecision::Expired);
        assert!(!redirected.may_render());
        assert!(!redirected.is_loading());
    }

    #[test]
    fn test_guard_state_settles_once() {
        let state = GuardState::Loading.settle(GuardDecision::WrongRole);
        assert_eq!(state, GuardState::Redirected(Route::Home));
        assert_eq!(state.settle(GuardDecision::Valid), GuardState::Redirected(Route::Home));

        let ok = GuardState::Loading.settle(GuardDecision::Valid);
        assert_eq!(ok.settle(GuardDecision::Expired), GuardState::Authenticated);
    }
}
