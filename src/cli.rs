use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, LoggingConfig};

#[derive(Debug, Parser)]
#[command(
    name = "blogdeck",
    version,
    about = "Terminal front end for a hosted blog backend"
)]
pub struct Cli {
    /// Config file (default: ~/.config/blogdeck/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the GraphQL endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Override request authentication: none, api_key or user_pool
    #[arg(long, value_name = "MODE")]
    pub auth_mode: Option<String>,

    /// Write logs to this file instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Apply command-line overrides on top of the loaded file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(mode) = &self.auth_mode {
            config.api.auth_mode_str = mode.clone();
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
    }

    pub fn log_path(config: &Config) -> PathBuf {
        config
            .logging
            .file
            .clone()
            .unwrap_or_else(LoggingConfig::default_file)
    }
}
