use thiserror::Error;

use crate::targeting::TargetingMode;

/// Problems caught before any request leaves the console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in both subject and message")]
    BlankTitle,
    #[error("Please fill in both subject and message")]
    BlankBody,
    #[error("Please select at least one store")]
    NoTargets,
    #[error("User not authenticated")]
    NotAuthenticated,
}

/// Problems with the sign-in or sign-up form, shown inline under the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter your full name")]
    MissingName,
    #[error("Please enter your email and password")]
    MissingCredentials,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetingError {
    /// Stores can only be toggled while picking manually or from the list.
    #[error("cannot toggle stores while targeting mode is {0:?}")]
    NotSelecting(TargetingMode),
    #[error("unknown duplicate policy `{0}` (expected `keep` or `collapse`)")]
    UnknownPolicy(String),
}
