use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GraphQL endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full URL of the GraphQL endpoint (e.g., "https://xyz.appsync-api.eu-west-1.amazonaws.com/graphql").
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// How requests are authenticated: "none", "api_key", "user_pool".
    #[serde(rename = "auth_mode", default = "default_auth_mode")]
    pub auth_mode_str: String,
    /// Key sent as `x-api-key` when `auth_mode = "api_key"`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Hosted identity provider (user pool) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// User pool endpoint (e.g., "https://cognito-idp.eu-west-1.amazonaws.com/").
    #[serde(default = "default_identity_endpoint")]
    pub endpoint: String,
    /// App client id registered with the user pool.
    #[serde(default)]
    pub client_id: String,
    /// Where the signed-in session is kept between runs.
    /// Defaults to `<data_dir>/blogdeck/session.json`.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event loop tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file path. Defaults to `<data_dir>/blogdeck/blogdeck.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:20002/graphql".to_string()
}

fn default_auth_mode() -> String {
    "none".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_identity_endpoint() -> String {
    "https://cognito-idp.us-east-1.amazonaws.com/".to_string()
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

impl IdentityConfig {
    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("blogdeck")
                .join("session.json")
        })
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

impl LoggingConfig {
    pub fn default_file() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blogdeck")
            .join("blogdeck.log")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auth_mode_str: default_auth_mode(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_identity_endpoint(),
            client_id: String::new(),
            session_file: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}
