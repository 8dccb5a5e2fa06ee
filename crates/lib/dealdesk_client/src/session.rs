//! Session store: the one place session state lives.
//!
//! Holds the bearer token, refresh token and cached user summary in durable
//! storage, mirrors the token into the `access_token` cookie, and keeps the
//! password-reset email in short-lived storage. The store is owned explicitly
//! and shared by `Arc`; nothing here is global.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cookies::{ACCESS_COOKIE, CookieJar, access_cookie, clear_access_cookie};
use crate::error::StorageError;
use crate::route_gate::{self, RouteDecision};
use crate::storage::{NullStorage, Storage};

/// Durable storage key for the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Durable storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Durable storage key for the JSON-serialized [`UserSummary`].
pub const USER_KEY: &str = "user";
/// Short-lived storage key carrying the email through the reset flow.
pub const RESET_EMAIL_KEY: &str = "reset_email";

/// Cached identity of the logged-in admin, for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// The authenticated identity held between login and logout/expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserSummary,
}

/// Owner of all client-side session state.
pub struct SessionStore {
    durable: Arc<dyn Storage>,
    cookies: CookieJar,
    ephemeral: Arc<dyn Storage>,
}

impl SessionStore {
    /// Create a store over the three storage areas.
    pub fn new(
        durable: Arc<dyn Storage>,
        cookies: Arc<dyn Storage>,
        ephemeral: Arc<dyn Storage>,
    ) -> Self {
        Self {
            durable,
            cookies: CookieJar::new(cookies),
            ephemeral,
        }
    }

    /// A store with no storage at all; every read is empty.
    pub fn detached() -> Self {
        Self::new(
            Arc::new(NullStorage),
            Arc::new(NullStorage),
            Arc::new(NullStorage),
        )
    }

    /// Current bearer token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.durable
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.durable.get(REFRESH_TOKEN_KEY)
    }

    /// Cached user summary. A corrupt entry reads as `None`.
    pub fn user(&self) -> Option<UserSummary> {
        let raw = self.durable.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable cached user");
                None
            }
        }
    }

    /// The full current session, when every piece of it is present.
    pub fn get(&self) -> Option<Session> {
        Some(Session {
            access_token: self.access_token()?,
            refresh_token: self.refresh_token()?,
            user: self.user()?,
        })
    }

    /// Replace the current session and set the cookie mirror.
    pub fn set(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)?;
        self.durable.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        self.durable.set(REFRESH_TOKEN_KEY, &session.refresh_token)?;
        self.durable.set(USER_KEY, &user)?;
        self.cookies.add(access_cookie(&session.access_token))?;
        debug!(user_id = session.user.id, "session stored");
        Ok(())
    }

    /// Remove tokens, cached user and cookie. Safe to call repeatedly.
    ///
    /// Every key is attempted even if an earlier removal fails; the first
    /// failure is returned.
    pub fn clear(&self) -> Result<(), StorageError> {
        let results = [
            self.durable.remove(ACCESS_TOKEN_KEY),
            self.durable.remove(REFRESH_TOKEN_KEY),
            self.durable.remove(USER_KEY),
            self.cookies.add(clear_access_cookie()),
        ];
        debug!("session cleared");
        results.into_iter().collect()
    }

    /// Whether the route-gating cookie is present.
    pub fn has_session_cookie(&self) -> bool {
        self.cookies.get(ACCESS_COOKIE).is_some()
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Apply the route gate to `path` using this store's cookie.
    pub fn gate(&self, path: &str) -> RouteDecision {
        route_gate::gate(path, self.has_session_cookie())
    }

    /// Password-reset flow state backed by short-lived storage.
    pub fn password_reset(&self) -> PasswordResetFlow {
        PasswordResetFlow {
            storage: Arc::clone(&self.ephemeral),
        }
    }
}

// =============================================================================
// Password reset flow
// =============================================================================

/// The reset email is missing; the flow must restart at forgot-password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("password reset expired, start again at {}", route_gate::FORGOT_PASSWORD_PATH)]
pub struct FlowExpired;

/// Carries the email across forgot-password → verify-otp → set-new-password.
pub struct PasswordResetFlow {
    storage: Arc<dyn Storage>,
}

impl PasswordResetFlow {
    /// Remember the email after the OTP was sent.
    pub fn begin(&self, email: &str) -> Result<(), StorageError> {
        self.storage.set(RESET_EMAIL_KEY, email)
    }

    /// Email for the flow in progress.
    pub fn email(&self) -> Result<String, FlowExpired> {
        self.storage
            .get(RESET_EMAIL_KEY)
            .filter(|e| !e.is_empty())
            .ok_or(FlowExpired)
    }

    /// Forget the email once the new password is set.
    pub fn finish(&self) -> Result<(), StorageError> {
        self.storage.remove(RESET_EMAIL_KEY)
    }
}
