//! Authentication and session gating.
//!
//! This module provides:
//! - `token`: decoding of the bearer token's claims (expiry and role)
//! - `guard`: the admin session guard, a pure decision plus redirect policy
//! - `store`: where the token lives (file, OS keychain, memory)
//! - `session`: `SessionContext`, the injected session object
//! - `credentials`: remembered login passwords in the OS keychain

pub mod clock;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod session;
pub mod store;
pub mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::CredentialStore;
pub use error::AuthError;
pub use guard::{evaluate, ClearPolicy, GuardDecision, GuardOutcome, GuardState, SessionGuard};
pub use session::SessionContext;
pub use store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
pub use token::{decode_claims, Claims, Role, SessionToken};
