use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Remote table holding operator profiles (display names).
pub const PROFILES_TABLE: &str = "user_profiles";

/// Shown in the header when a profile has no usable name.
pub const FALLBACK_DISPLAY_NAME: &str = "User";

pub const MIN_PASSWORD_LEN: usize = 6;

/// Identifier of an authenticated operator, as issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profile row joined to an identity for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Email + password pair for the password grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Build from the login form. The email is trimmed, the password is not.
    pub fn from_form(email: &str, password: &str) -> Result<Self, FormError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Sign-up request: credentials plus the profile display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Build from the register form, checking the fields in display order.
    pub fn from_form(
        full_name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Self, FormError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(FormError::MissingName);
        }
        let credentials = Credentials::from_form(email, password)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if password != confirm {
            return Err(FormError::PasswordMismatch);
        }
        Ok(Self {
            full_name: full_name.to_string(),
            email: credentials.email,
            password: credentials.password,
        })
    }
}

/// An authenticated session.
///
/// The access token is attached to every gateway call made on behalf of the
/// operator, so row-level policies on the backend see the right identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
    pub access_token: String,
    pub profile: Option<UserProfile>,
}

impl Session {
    pub fn with_profile(mut self, profile: Option<UserProfile>) -> Self {
        self.profile = profile;
        self
    }

    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.full_name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }
}

/// Holder for the current session, passed explicitly to the route gate and screens.
///
/// Populated on sign-in, cleared on sign-out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restored(session: Option<Session>) -> Self {
        Self { current: session }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn sign_in(&mut self, session: Session) {
        self.current = Some(session);
    }

    /// Clear the session, returning whatever was held.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.current.take()
    }

    fn holds(&self, access_token: &str) -> bool {
        self.current
            .as_ref()
            .is_some_and(|s| s.access_token == access_token)
    }

    /// Swap in a re-validated copy of the session issued under
    /// `access_token`. Returns `false`, leaving the context alone, when that
    /// session was signed out or replaced while the check ran.
    pub fn refresh(&mut self, access_token: &str, fresh: Session) -> bool {
        if !self.holds(access_token) {
            return false;
        }
        self.current = Some(fresh);
        true
    }

    /// Drop the session issued under `access_token` if it is still held.
    pub fn revoke(&mut self, access_token: &str) -> Option<Session> {
        if !self.holds(access_token) {
            return None;
        }
        self.current.take()
    }
}
