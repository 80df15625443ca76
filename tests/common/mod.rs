//! Shared test utilities and fakes.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use blogdeck::api::{ApiError, BlogApi};
use blogdeck::auth::{AuthEvent, IdentityError, IdentityProvider};
use blogdeck::config::SecureString;
use blogdeck::model::{
    Blog, Comment, Connection, CreateBlogInput, CreateCommentInput, CreatePostInput, Post, User,
};
use blogdeck::ui::app::{App, UiCommand};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// `TopPage` payload with two blogs; the second has a null post slot.
pub const TOP_PAGE_RESPONSE: &str = r#"{
  "data": {
    "listBlogs": {
      "items": [
        {
          "id": "b1",
          "name": "Travel",
          "posts": {
            "items": [
              {
                "id": "p1",
                "title": "Lisbon",
                "createdAt": "2021-06-01T10:00:00.000Z",
                "comments": { "items": [ { "id": "c1", "content": "Lovely" } ] }
              }
            ]
          }
        },
        {
          "id": "b2",
          "name": "Food",
          "posts": { "items": [ null ] }
        }
      ]
    }
  }
}"#;

// -- Builders -----------------------------------------------------------------

pub fn comment(id: &str, content: &str) -> Comment {
    Comment {
        id: id.to_string(),
        content: content.to_string(),
    }
}

pub fn post(id: &str, title: &str, comments: Vec<Comment>) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        created_at: "2021-01-01T00:00:00.000Z".to_string(),
        comments: Some(Connection::from_items(comments)),
    }
}

pub fn blog(id: &str, name: &str, posts: Vec<Post>) -> Blog {
    Blog {
        id: id.to_string(),
        name: name.to_string(),
        posts: Some(Connection::from_items(posts)),
    }
}

/// App wired to a command channel the test can drain.
pub fn make_app() -> (App, mpsc::Receiver<UiCommand>) {
    let (tx, rx) = mpsc::channel(32);
    let mut app = App::new();
    app.set_command_sender(tx);
    (app, rx)
}

pub fn drain(rx: &mut mpsc::Receiver<UiCommand>) -> Vec<UiCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = rx.try_recv() {
        commands.push(command);
    }
    commands
}

// -- Fake backend -------------------------------------------------------------

/// In-memory backend. Mutations append to the store so a refetch sees them.
#[derive(Default)]
pub struct FakeApi {
    pub blogs: Mutex<Vec<Blog>>,
    pub fail_reads: Mutex<bool>,
    pub fail_mutations: Mutex<bool>,
    /// Delay applied to successive `list_blogs` calls, front first.
    pub read_delays: Mutex<VecDeque<Duration>>,
    pub list_calls: AtomicUsize,
    pub mutations: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl FakeApi {
    pub fn with_blogs(blogs: Vec<Blog>) -> Self {
        let api = Self::default();
        *api.blogs.lock() = blogs;
        api
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn mutation(&self, operation: &'static str) -> Result<String, ApiError> {
        self.mutations.lock().push(operation.to_string());
        if *self.fail_mutations.lock() {
            return Err(ApiError::Graphql {
                operation,
                messages: vec!["Unauthorized: Not Authorized to access".to_string()],
            });
        }
        Ok(format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst)))
    }
}

#[async_trait]
impl BlogApi for FakeApi {
    async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.blogs.lock().clone();
        let delay = self.read_delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_reads.lock() {
            return Err(ApiError::Graphql {
                operation: "TopPage",
                messages: vec!["backend down".to_string()],
            });
        }
        Ok(snapshot)
    }

    async fn create_blog(&self, input: CreateBlogInput) -> Result<String, ApiError> {
        let id = self.mutation("NewBlog")?;
        self.blogs.lock().push(blog(&id, &input.name, Vec::new()));
        Ok(id)
    }

    async fn create_post(&self, input: CreatePostInput) -> Result<String, ApiError> {
        let id = self.mutation("NewPost")?;
        let mut blogs = self.blogs.lock();
        if let Some(target) = blogs.iter_mut().find(|b| b.id == input.blog_posts_id) {
            target
                .posts
                .get_or_insert_with(Connection::default)
                .items
                .push(Some(post(&id, &input.title, Vec::new())));
        }
        Ok(id)
    }

    async fn create_comment(&self, input: CreateCommentInput) -> Result<String, ApiError> {
        let id = self.mutation("NewComment")?;
        let mut blogs = self.blogs.lock();
        for target in blogs.iter_mut().flat_map(|b| b.posts.iter_mut()) {
            for post in target.items.iter_mut().flatten() {
                if post.id == input.post_comments_id {
                    post.comments
                        .get_or_insert_with(Connection::default)
                        .items
                        .push(Some(comment(&id, &input.content)));
                }
            }
        }
        Ok(id)
    }
}

// -- Fake identity provider ---------------------------------------------------

pub const GOOD_PASSWORD: &str = "correct horse";

pub struct FakeIdentity {
    user: Mutex<Option<User>>,
    events: broadcast::Sender<AuthEvent>,
    /// Delay applied to `current_user`.
    pub lookup_delay: Mutex<Option<Duration>>,
    /// Make `current_user` fail as if the provider were unreachable.
    pub fail_lookups: Mutex<bool>,
}

impl FakeIdentity {
    pub fn signed_out() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            user: Mutex::new(None),
            events,
            lookup_delay: Mutex::new(None),
            fail_lookups: Mutex::new(false),
        }
    }

    pub fn signed_in(username: &str) -> Self {
        let identity = Self::signed_out();
        *identity.user.lock() = Some(User::new(username));
        identity
    }

    pub fn publish(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn current_user(&self) -> Result<User, IdentityError> {
        let delay = *self.lookup_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_lookups.lock() {
            return Err(IdentityError::Rejected {
                kind: "InternalErrorException".to_string(),
                message: "service unavailable".to_string(),
            });
        }
        self.user.lock().clone().ok_or(IdentityError::NotSignedIn)
    }

    async fn sign_in(&self, username: &str, password: &SecureString) -> Result<User, IdentityError> {
        if password.expose() != GOOD_PASSWORD {
            return Err(IdentityError::Rejected {
                kind: "NotAuthorizedException".to_string(),
                message: "Incorrect username or password.".to_string(),
            });
        }
        let user = User::new(username);
        *self.user.lock() = Some(user.clone());
        self.publish(AuthEvent::SignedIn);
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        *self.user.lock() = None;
        self.publish(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn id_token(&self) -> Option<SecureString> {
        self.user
            .lock()
            .as_ref()
            .map(|user| SecureString::new(format!("token-{}", user.username)))
    }
}
