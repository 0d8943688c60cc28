use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AuthError;

/// Permission class carried in the token's role claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Customer,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Other(s) => s,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "customer" => Role::Customer,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Role::from(s.as_str()))
    }
}

/// Claims read from the token payload.
///
/// The backend issues the role as `type`; `role` is accepted too, and
/// `type` wins when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClaims")]
pub struct Claims {
    /// Expiry as a UNIX timestamp in seconds, possibly fractional
    pub exp: f64,
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Payload as it arrives, before the role claim is resolved.
#[derive(Deserialize)]
struct RawClaims {
    exp: f64,
    #[serde(default, rename = "type")]
    kind: Option<Role>,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, rename = "firstName")]
    first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    last_name: Option<String>,
}

impl TryFrom<RawClaims> for Claims {
    type Error = String;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        if !raw.exp.is_finite() {
            return Err("exp is not a finite number".to_string());
        }
        let role = raw
            .kind
            .or(raw.role)
            .ok_or_else(|| "missing field `type`".to_string())?;
        Ok(Claims {
            exp: raw.exp,
            role,
            email: raw.email,
            first_name: raw.first_name,
            last_name: raw.last_name,
        })
    }
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.exp_millis()).single()
    }

    /// Whole seconds of the expiry, rounded down.
    pub fn exp_seconds(&self) -> i64 {
        self.exp.floor() as i64
    }

    fn exp_millis(&self) -> i64 {
        (self.exp * 1000.0).floor() as i64
    }

    /// Expired when the expiry instant is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp * 1000.0 <= now.timestamp_millis() as f64
    }

    /// Display name for the header user tag, "Guest" when unknown.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !name.is_empty() {
            name
        } else if let Some(ref email) = self.email {
            email.clone()
        } else {
            "Guest".to_string()
        }
    }
}

/// Bearer token as stored locally. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Decode the payload segment of a JWT without verifying its signature.
///
/// Signature checks belong to the backend; the client only needs the
/// claims to decide where to send the user.
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(AuthError::malformed("expected three dot-separated segments")),
    };

    let bytes = decode_segment(payload)
        .ok_or_else(|| AuthError::malformed("payload is not base64url"))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::malformed(format!("invalid claims: {}", e)))
}

/// Base64url decode a JWT segment, tolerating stray padding.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')).ok()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_decode_claims_reads_type_claim() {
        let token = token_with_payload(&serde_json::json!({
            "exp": 1_900_000_000,
            "type": "admin",
            "email": "admin@example.com",
            "firstName": "Ada",
            "lastName": "Admin"
        }));

        let claims = decode_claims(&token).expect("token should decode");
        assert_eq!(claims.exp, 1_900_000_000.0);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.email.as_deref(), Some("admin@example.com"));
        assert_eq!(claims.display_name(), "Ada Admin");
    }

    #[test]
    fn test_decode_claims_accepts_role_alias() {
        let token = token_with_payload(&serde_json::json!({ "exp": 10, "role": "customer" }));
        let claims = decode_claims(&token).expect("token should decode");
        assert_eq!(claims.role, Role::Customer);
    }

    #[test]
    fn test_unknown_role_is_kept_verbatim() {
        let claims = decode_claims(&token_for(10, "staff")).expect("token should decode");
        assert_eq!(claims.role, Role::Other("staff".to_string()));
        assert_eq!(claims.role.to_string(), "staff");
        assert!(!claims.role.is_admin());
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        assert!(matches!(decode_claims(""), Err(AuthError::MissingToken)));
        assert!(matches!(decode_claims("not-a-token"), Err(AuthError::MalformedToken(_))));
        assert!(matches!(decode_claims("a.b"), Err(AuthError::MalformedToken(_))));
        assert!(matches!(decode_claims("a.b.c.d"), Err(AuthError::MalformedToken(_))));
        assert!(matches!(decode_claims("a.!!!.c"), Err(AuthError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_claims_requires_exp_and_role() {
        let no_exp = token_with_payload(&serde_json::json!({ "type": "admin" }));
        assert!(matches!(decode_claims(&no_exp), Err(AuthError::MalformedToken(_))));

        let no_role = token_with_payload(&serde_json::json!({ "exp": 10 }));
        assert!(matches!(decode_claims(&no_role), Err(AuthError::MalformedToken(_))));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let token = token_for(42, "admin");
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        parts[1].push_str("==");
        let claims = decode_claims(&parts.join(".")).expect("padding should be tolerated");
        assert_eq!(claims.exp, 42.0);
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = decode_claims(&token_for(100, "admin")).expect("token should decode");
        let at = |secs| Utc.timestamp_opt(secs, 0).single().expect("valid timestamp");
        assert!(claims.is_expired_at(at(100)));
        assert!(claims.is_expired_at(at(101)));
        assert!(!claims.is_expired_at(at(99)));
    }

    #[test]
    fn test_fractional_expiry_decodes() {
        let token = token_with_payload(&serde_json::json!({ "exp": 100.5, "type": "admin" }));
        let claims = decode_claims(&token).expect("fractional exp should decode");
        assert_eq!(claims.exp, 100.5);
        assert_eq!(claims.exp_seconds(), 100);

        let at = |millis| Utc.timestamp_millis_opt(millis).single().expect("valid timestamp");
        assert!(!claims.is_expired_at(at(100_000)));
        assert!(!claims.is_expired_at(at(100_499)));
        assert!(claims.is_expired_at(at(100_500)));
        assert_eq!(claims.expires_at(), Some(at(100_500)));
    }

    #[test]
    fn test_type_and_role_claims_together() {
        let both = token_with_payload(&serde_json::json!({
            "exp": 1_900_000_000,
            "type": "admin",
            "role": "admin"
        }));
        assert_eq!(decode_claims(&both).expect("token should decode").role, Role::Admin);

        let disagree = token_with_payload(&serde_json::json!({
            "exp": 1_900_000_000,
            "type": "customer",
            "role": "admin"
        }));
        assert_eq!(decode_claims(&disagree).expect("token should decode").role, Role::Customer);
    }

    #[test]
    fn test_session_token_debug_is_redacted() {
        let token = SessionToken::new("secret.value.here");
        assert_eq!(format!("{:?}", token), "SessionToken(<redacted>)");
        assert_eq!(token.as_str(), "secret.value.here");
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut claims = decode_claims(&token_for(1, "customer")).expect("token should decode");
        assert_eq!(claims.display_name(), "Guest");
        claims.email = Some("guest@example.com".to_string());
        assert_eq!(claims.display_name(), "guest@example.com");
    }
}
