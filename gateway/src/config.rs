//! Gateway and targeting configuration.
//!
//! Browser builds are configured at compile time (`option_env!`), the same
//! names are read at runtime for native tools and tests.

use storecast_common::targeting::{DuplicatePolicy, TargetingConfig};

use crate::error::ConfigError;

pub const GATEWAY_URL_VAR: &str = "STORECAST_GATEWAY_URL";
pub const ANON_KEY_VAR: &str = "STORECAST_ANON_KEY";
pub const MANUAL_DUPLICATES_VAR: &str = "STORECAST_MANUAL_DUPLICATES";

/// Where the hosted data service lives and the public key it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl GatewayConfig {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::Missing(GATEWAY_URL_VAR));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(base_url.to_string()));
        }
        let anon_key = anon_key.trim();
        if anon_key.is_empty() {
            return Err(ConfigError::Missing(ANON_KEY_VAR));
        }
        Ok(Self {
            base_url: base_url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Values baked in when the front end was compiled.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("STORECAST_GATEWAY_URL"), option_env!("STORECAST_ANON_KEY"))
    }

    /// Values from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(GATEWAY_URL_VAR).ok();
        let key = std::env::var(ANON_KEY_VAR).ok();
        Self::from_values(url.as_deref(), key.as_deref())
    }

    fn from_values(url: Option<&str>, key: Option<&str>) -> Result<Self, ConfigError> {
        let url = url.ok_or(ConfigError::Missing(GATEWAY_URL_VAR))?;
        let key = key.ok_or(ConfigError::Missing(ANON_KEY_VAR))?;
        Self::new(url, key)
    }
}

/// Parse the manual-duplicates setting; unset means the default policy.
pub fn targeting_config(value: Option<&str>) -> Result<TargetingConfig, ConfigError> {
    let manual_duplicates = match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<DuplicatePolicy>()?,
        None => DuplicatePolicy::default(),
    };
    Ok(TargetingConfig { manual_duplicates })
}

pub fn targeting_from_build_env() -> Result<TargetingConfig, ConfigError> {
    targeting_config(option_env!("STORECAST_MANUAL_DUPLICATES"))
}

pub fn targeting_from_env() -> Result<TargetingConfig, ConfigError> {
    targeting_config(std::env::var(MANUAL_DUPLICATES_VAR).ok().as_deref())
}
