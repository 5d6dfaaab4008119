use thiserror::Error;

use storecast_common::error::{TargetingError, ValidationError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}: {body}")]
    Rejected {
        status: u16,
        url: String,
        body: String,
    },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("gateway unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("gateway URL must start with http:// or https://, got `{0}`")]
    InvalidUrl(String),
    #[error(transparent)]
    Targeting(#[from] TargetingError),
}

/// Outcome of a failed message submit.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Notice shown when a message insert fails for any remote reason.
pub const CREATE_FAILED_NOTICE: &str = "Failed to create message";
/// Notice shown when a delete fails for any remote reason.
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete message";
/// Notice shown when sign-in fails for any reason.
pub const SIGN_IN_FAILED_NOTICE: &str = "Invalid email or password";
/// Notice shown when registration fails for any remote reason.
pub const REGISTER_FAILED_NOTICE: &str = "Failed to create account";

impl SubmitError {
    /// Text for the blocking prompt. Remote causes are never told apart.
    pub fn notice(&self) -> String {
        match self {
            Self::Invalid(e) => e.to_string(),
            Self::Gateway(_) => CREATE_FAILED_NOTICE.to_string(),
        }
    }
}
