//! Credential resolution from configuration.
//!
//! This module provides secure handling of API keys and session tokens
//! resolved from the config at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::loader::ConfigError;
use super::types::ApiConfig;

/// How GraphQL requests are authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Unauthenticated calls.
    None,
    /// Static `x-api-key` header.
    ApiKey,
    /// Signed requests carrying the identity provider's session token.
    /// Guests send no credential.
    UserPool,
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(AuthMode::None),
            "api_key" => Ok(AuthMode::ApiKey),
            "user_pool" => Ok(AuthMode::UserPool),
            other => Err(ConfigError::ValidationError {
                message: format!(
                    "Unknown auth_mode '{}' (expected none, api_key or user_pool)",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthMode::None => "none",
            AuthMode::ApiKey => "api_key",
            AuthMode::UserPool => "user_pool",
        };
        f.write_str(name)
    }
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution for the GraphQL endpoint.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    /// API key resolved successfully.
    Configured(SecureString),
    /// The selected mode needs a credential that is missing.
    Unconfigured { reason: String },
    /// Credential comes from the signed-in session at request time.
    Session,
    /// No authentication required.
    NoAuth,
}

impl ApiConfig {
    /// Parse the auth_mode field.
    pub fn auth_mode(&self) -> Result<AuthMode, ConfigError> {
        self.auth_mode_str.parse()
    }

    /// Resolve the static credential for the configured mode.
    ///
    /// Called on demand and not cached.
    pub fn resolve_credential(&self) -> Result<CredentialStatus, ConfigError> {
        Ok(match self.auth_mode()? {
            AuthMode::None => CredentialStatus::NoAuth,
            AuthMode::UserPool => CredentialStatus::Session,
            AuthMode::ApiKey => match self.api_key.as_deref() {
                Some(key) if !key.is_empty() => {
                    CredentialStatus::Configured(SecureString::new(key))
                }
                _ => CredentialStatus::Unconfigured {
                    reason: "api_key is not set".to_string(),
                },
            },
        })
    }
}
