mod credentials;
mod loader;
mod types;

pub use credentials::{AuthMode, CredentialStatus, SecureString};
pub use loader::ConfigError;
pub use types::{ApiConfig, Config, IdentityConfig, LoggingConfig, UiConfig};
