//! Entities returned by the blog backend and the inputs that create them.
//!
//! Identifiers are always assigned by the backend.

use serde::{Deserialize, Serialize};

/// A paginated collection as returned by the backend: `{ items: [T | null] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub items: Vec<Option<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(Some).collect(),
        }
    }

    /// Non-null items in backend order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().flatten()
    }

    pub fn into_present(self) -> Vec<T> {
        self.items.into_iter().flatten().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub posts: Option<Connection<Post>>,
}

impl Blog {
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().flat_map(|connection| connection.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Rendered verbatim.
    pub created_at: String,
    #[serde(default)]
    pub comments: Option<Connection<Comment>>,
}

impl Post {
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().flat_map(|connection| connection.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
}

/// The signed-in identity. Absent when signed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.username
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBlogInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub title: String,
    pub blog_posts_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    pub content: String,
    pub post_comments_id: String,
}
