//! Identity provider seam and the hosted user-pool implementation.

mod error;
mod hosted;
mod session_file;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::SecureString;
use crate::model::User;

pub use error::IdentityError;
pub use hosted::HostedIdentity;
pub use session_file::{SessionFile, StoredSession};

/// Sign-in state transitions published by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user. Fails with [`IdentityError::NotSignedIn`] for guests.
    async fn current_user(&self) -> Result<User, IdentityError>;

    /// Authenticate and publish [`AuthEvent::SignedIn`] on success.
    async fn sign_in(&self, username: &str, password: &SecureString) -> Result<User, IdentityError>;

    /// Drop the session and publish [`AuthEvent::SignedOut`].
    async fn sign_out(&self) -> Result<(), IdentityError>;

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;

    /// Token attached to signed GraphQL requests, if signed in.
    fn id_token(&self) -> Option<SecureString>;
}

/// Handle to a forwarding task; unsubscribes when dropped.
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
