//! Authentication header building for GraphQL requests.
//!
//! Builds the appropriate header from the configured auth mode and,
//! for signed requests, the identity provider's current session.

use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::config::{ApiConfig, AuthMode, ConfigError, CredentialStatus, SecureString};

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

#[derive(Clone)]
pub enum RequestAuth {
    Anonymous,
    ApiKey(SecureString),
    /// Sends the session's id token; guests send nothing.
    UserPool(Arc<dyn IdentityProvider>),
}

impl RequestAuth {
    pub fn from_config(
        api: &ApiConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, ConfigError> {
        match api.resolve_credential()? {
            CredentialStatus::NoAuth => Ok(RequestAuth::Anonymous),
            CredentialStatus::Configured(key) => Ok(RequestAuth::ApiKey(key)),
            CredentialStatus::Session => Ok(RequestAuth::UserPool(identity)),
            CredentialStatus::Unconfigured { reason } => Err(ConfigError::ValidationError {
                message: format!("auth_mode '{}' is not usable: {}", api.auth_mode_str, reason),
            }),
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            RequestAuth::Anonymous => AuthMode::None,
            RequestAuth::ApiKey(_) => AuthMode::ApiKey,
            RequestAuth::UserPool(_) => AuthMode::UserPool,
        }
    }

    /// Returns `Some((header_name, header_value))` if a credential is available.
    pub fn header(&self) -> Option<AuthHeader> {
        match self {
            RequestAuth::Anonymous => None,
            RequestAuth::ApiKey(key) => Some(("x-api-key".to_string(), key.expose().to_string())),
            RequestAuth::UserPool(identity) => identity
                .id_token()
                .filter(|token| !token.is_empty())
                .map(|token| ("Authorization".to_string(), token.expose().to_string())),
        }
    }
}

impl std::fmt::Debug for RequestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RequestAuth({})", self.mode())
    }
}
