//! Background side of the UI: runs GraphQL and identity calls on the tokio
//! runtime and reports results back as [`AppEvent`]s.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::api::{ApiError, BlogApi};
use crate::auth::{AuthEvent, IdentityError, IdentityProvider, Subscription};
use crate::model::{Blog, User};
use crate::shutdown::ShutdownHandle;
use crate::ui::app::UiCommand;
use crate::ui::events::{AppEvent, AppEventSender};

#[derive(Clone)]
pub struct Worker {
    api: Arc<dyn BlogApi>,
    identity: Arc<dyn IdentityProvider>,
    events: AppEventSender,
    fetch_seq: Arc<AtomicU64>,
}

impl Worker {
    pub fn new(
        api: Arc<dyn BlogApi>,
        identity: Arc<dyn IdentityProvider>,
        events: AppEventSender,
    ) -> Self {
        Self {
            api,
            identity,
            events,
            fetch_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Serve commands until the channel closes or shutdown is signaled.
    ///
    /// Each command runs in its own task so a slow request never blocks the
    /// next one; snapshot sequence numbers sort out the arrival order.
    pub async fn run(self, mut commands: mpsc::Receiver<UiCommand>, shutdown: ShutdownHandle) {
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                command = commands.recv() => match command {
                    Some(command) => {
                        self.dispatch(command);
                    }
                    None => break,
                },
            }
        }
        tracing::debug!("worker stopped");
    }

    pub fn dispatch(&self, command: UiCommand) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move { worker.execute(command).await })
    }

    async fn execute(&self, command: UiCommand) {
        match command {
            UiCommand::FetchBlogs => self.refetch().await,
            UiCommand::CreateBlog(input) => {
                let result = self.api.create_blog(input).await;
                self.after_mutation("NewBlog", result).await;
            }
            UiCommand::CreatePost(input) => {
                let result = self.api.create_post(input).await;
                self.after_mutation("NewPost", result).await;
            }
            UiCommand::CreateComment(input) => {
                let result = self.api.create_comment(input).await;
                self.after_mutation("NewComment", result).await;
            }
            UiCommand::ResolveUser { generation } => {
                let event = match resolve_user(self.identity.as_ref()).await {
                    Ok(user) => AppEvent::UserResolved { generation, user },
                    Err(err) => {
                        tracing::warn!(error = %err, "could not resolve current user");
                        AppEvent::UserLookupFailed { generation }
                    }
                };
                self.emit(event);
            }
            UiCommand::SignIn { username, password } => {
                if let Err(err) = self.identity.sign_in(&username, &password).await {
                    tracing::warn!(user = %username, error = %err, "sign-in failed");
                    self.emit(AppEvent::LoginFailed(err.to_string()));
                }
            }
            UiCommand::SignOut => {
                if let Err(err) = self.identity.sign_out().await {
                    tracing::warn!(error = %err, "sign-out failed");
                }
            }
        }
    }

    /// Issue the read query; the sequence number is taken before the request
    /// goes out so it reflects issue order.
    async fn refetch(&self) {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(blogs) = fetch_blogs(self.api.as_ref()).await {
            self.emit(AppEvent::BlogsLoaded { seq, blogs });
        }
    }

    async fn after_mutation(&self, operation: &str, result: Result<String, ApiError>) {
        match result {
            Ok(id) => {
                tracing::info!(operation, %id, "mutation succeeded");
                self.refetch().await;
            }
            Err(err) => tracing::warn!(operation, error = %err, "mutation failed"),
        }
    }

    fn emit(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("ui gone; dropping worker event");
        }
    }
}

/// Run the read query. Failures are logged and yield `None` so the caller
/// keeps whatever it showed before.
pub async fn fetch_blogs(api: &dyn BlogApi) -> Option<Vec<Blog>> {
    match api.list_blogs().await {
        Ok(blogs) => Some(blogs),
        Err(err) => {
            tracing::error!(error = %err, "error fetching blogs");
            None
        }
    }
}

/// `Ok(None)` only when nobody is signed in; other failures leave the
/// session as it was.
async fn resolve_user(identity: &dyn IdentityProvider) -> Result<Option<User>, IdentityError> {
    match identity.current_user().await {
        Ok(user) => Ok(Some(user)),
        Err(IdentityError::NotSignedIn) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Forward identity provider events to the UI until the returned
/// [`Subscription`] is dropped.
pub fn subscribe_auth_events(
    runtime: &Handle,
    mut receiver: broadcast::Receiver<AuthEvent>,
    events: AppEventSender,
) -> Subscription {
    let task = runtime.spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if events.send(AppEvent::Auth(event)).is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "auth events lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
    Subscription::new(task)
}
