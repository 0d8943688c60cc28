use thiserror::Error;

use super::guard::GuardDecision;

/// Reasons the session guard refuses an admin view.
///
/// Every variant ends in a redirect; they differ only in where the user is
/// sent and which notice is shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No session token stored")]
    MissingToken,

    #[error("Malformed session token: {0}")]
    MalformedToken(String),

    #[error("Session token expired at {expired_at}")]
    ExpiredToken { expired_at: i64 },

    #[error("Role '{role}' may not access this page")]
    InsufficientRole { role: String },
}

impl AuthError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AuthError::MalformedToken(reason.into())
    }

    /// Collapse the error into the guard's decision.
    pub fn decision(&self) -> GuardDecision {
        match self {
            AuthError::MissingToken | AuthError::MalformedToken(_) => GuardDecision::Unauthenticated,
            AuthError::ExpiredToken { .. } => GuardDecision::Expired,
            AuthError::InsufficientRole { .. } => GuardDecision::WrongRole,
        }
    }

    /// User-facing notice shown alongside the redirect.
    pub fn notice(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authentication required. Please log in.",
            AuthError::MalformedToken(_) => "Invalid token. Please log in again.",
            AuthError::ExpiredToken { .. } => "Session expired. Please log in again.",
            AuthError::InsufficientRole { .. } => "You must be an admin to access this page.",
        }
    }

    /// Whether the stored token is unusable and should be discarded.
    pub fn invalidates_token(&self) -> bool {
        matches!(self, AuthError::MalformedToken(_) | AuthError::ExpiredToken { .. })
    }
}
