//! GraphQL access to the blog backend.

mod auth;
mod client;
pub mod documents;
mod error;

use async_trait::async_trait;

use crate::model::{Blog, CreateBlogInput, CreateCommentInput, CreatePostInput};

pub use auth::{AuthHeader, RequestAuth};
pub use client::{ClientSetupError, GraphqlClient};
pub use error::ApiError;

/// Read query and mutations offered by the backend.
///
/// Each mutation returns only the identifier the backend assigned.
#[async_trait]
pub trait BlogApi: Send + Sync {
    /// `TopPage`: up to 10 blogs, each with up to 10 posts, each with up to 10 comments.
    async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError>;

    async fn create_blog(&self, input: CreateBlogInput) -> Result<String, ApiError>;

    async fn create_post(&self, input: CreatePostInput) -> Result<String, ApiError>;

    async fn create_comment(&self, input: CreateCommentInput) -> Result<String, ApiError>;
}
