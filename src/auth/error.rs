use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Identity provider is not configured: {0}")]
    NotConfigured(String),

    /// The provider refused the credentials or token.
    #[error("{kind}: {message}")]
    Rejected { kind: String, message: String },

    /// The provider asked for a follow-up step this client does not handle.
    #[error("Sign-in requires unsupported challenge '{0}'")]
    UnsupportedChallenge(String),

    #[error("Identity request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode identity response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session file '{path}': {source}")]
    SessionStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
