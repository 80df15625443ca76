//! Errors raised while talking to the GraphQL backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, TLS or timeout failure.
    #[error("Request '{operation}' failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success HTTP status.
    #[error("Request '{operation}' returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Backend answered with a GraphQL `errors` array.
    #[error("Request '{operation}' returned errors: {}", messages.join("; "))]
    Graphql {
        operation: &'static str,
        messages: Vec<String>,
    },

    #[error("Failed to decode '{operation}' response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// `data` or the operation's root field was null.
    #[error("Response to '{operation}' is missing '{field}'")]
    MissingData {
        operation: &'static str,
        field: &'static str,
    },
}

impl ApiError {
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            ApiError::Client(_) => None,
            ApiError::Transport { operation, .. }
            | ApiError::Status { operation, .. }
            | ApiError::Graphql { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::MissingData { operation, .. } => Some(*operation),
        }
    }
}
