//! Text held by the create forms.
//!
//! Each blog and post has its own form; text is keyed by the form's target
//! so it survives re-renders and snapshot replacement.

use std::collections::HashMap;

use crate::model::{CreateBlogInput, CreateCommentInput, CreatePostInput};

/// Which create form a piece of text belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormTarget {
    NewBlog,
    NewPost { blog_id: String },
    NewComment { post_id: String },
}

impl FormTarget {
    pub fn label(&self) -> &'static str {
        match self {
            FormTarget::NewBlog => "Create new blog · Name",
            FormTarget::NewPost { .. } => "Title",
            FormTarget::NewComment { .. } => "Comment",
        }
    }

    pub fn button(&self) -> &'static str {
        match self {
            FormTarget::NewBlog => "Create",
            FormTarget::NewPost { .. } => "Post",
            FormTarget::NewComment { .. } => "Comment",
        }
    }
}

/// Payload built from a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Blog(CreateBlogInput),
    Post(CreatePostInput),
    Comment(CreateCommentInput),
}

impl Submission {
    /// Text is sent verbatim; the parent id comes from the target.
    pub fn build(target: &FormTarget, text: &str) -> Self {
        let text = text.to_string();
        match target {
            FormTarget::NewBlog => Submission::Blog(CreateBlogInput { name: text }),
            FormTarget::NewPost { blog_id } => Submission::Post(CreatePostInput {
                title: text,
                blog_posts_id: blog_id.clone(),
            }),
            FormTarget::NewComment { post_id } => Submission::Comment(CreateCommentInput {
                content: text,
                post_comments_id: post_id.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInputs {
    texts: HashMap<FormTarget, String>,
}

impl FormInputs {
    pub fn text(&self, target: &FormTarget) -> &str {
        self.texts.get(target).map(String::as_str).unwrap_or("")
    }

    pub fn push(&mut self, target: &FormTarget, ch: char) {
        self.texts.entry(target.clone()).or_default().push(ch);
    }

    pub fn pop(&mut self, target: &FormTarget) {
        if let Some(text) = self.texts.get_mut(target) {
            text.pop();
        }
    }
}
