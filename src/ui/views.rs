//! Entity renderers.
//!
//! Each renderer projects one entity into rows, recursing into its children.
//! Rows carry a [`RowKey`] built from the entity id so the selection stays on
//! the same entity when a new snapshot replaces the old one.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::{Blog, Comment, Post};
use crate::ui::forms::{FormInputs, FormTarget};
use crate::ui::theme::{ACCENT, BODY_TEXT, COMMENT_TEXT, FORM_LABEL, MUTED_TEXT, SELECTED_ROW};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKey {
    Blog(String),
    Post(String),
    Comment(String),
    Form(FormTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent<'a> {
    Blog { name: &'a str },
    Post { title: &'a str, created_at: &'a str },
    Comment { content: &'a str },
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub key: RowKey,
    pub depth: u16,
    pub content: RowContent<'a>,
}

impl Row<'_> {
    pub fn form_target(&self) -> Option<&FormTarget> {
        match &self.key {
            RowKey::Form(target) => Some(target),
            _ => None,
        }
    }

    pub fn to_line(&self, forms: &FormInputs, selected: bool) -> Line<'static> {
        let indent = Span::raw("  ".repeat(usize::from(self.depth)));
        let mut spans = vec![indent];

        match &self.content {
            RowContent::Blog { name } => spans.push(Span::styled(
                (*name).to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            RowContent::Post { title, created_at } => {
                spans.push(Span::styled(
                    (*title).to_string(),
                    Style::default().fg(BODY_TEXT).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    format!("  Posted: {}", created_at),
                    Style::default().fg(MUTED_TEXT),
                ));
            }
            RowContent::Comment { content } => spans.push(Span::styled(
                format!("› {}", content),
                Style::default().fg(COMMENT_TEXT),
            )),
            RowContent::Form => {
                if let RowKey::Form(target) = &self.key {
                    let cursor = if selected { "▏" } else { "" };
                    spans.push(Span::styled(
                        format!("{}: ", target.label()),
                        Style::default().fg(FORM_LABEL),
                    ));
                    spans.push(Span::styled(
                        format!("[{}{}]", forms.text(target), cursor),
                        Style::default().fg(BODY_TEXT),
                    ));
                    spans.push(Span::styled(
                        format!(" <{}>", target.button()),
                        Style::default().fg(MUTED_TEXT),
                    ));
                }
            }
        }

        let line = Line::from(spans);
        if selected {
            line.style(Style::default().bg(SELECTED_ROW))
        } else {
            line
        }
    }
}

pub fn comment_row(comment: &Comment, depth: u16) -> Row<'_> {
    Row {
        key: RowKey::Comment(comment.id.clone()),
        depth,
        content: RowContent::Comment {
            content: &comment.content,
        },
    }
}

/// Title and timestamp, the comments, then the new-comment form.
pub fn post_rows(post: &Post, depth: u16) -> Vec<Row<'_>> {
    let mut rows = vec![Row {
        key: RowKey::Post(post.id.clone()),
        depth,
        content: RowContent::Post {
            title: &post.title,
            created_at: &post.created_at,
        },
    }];
    rows.extend(post.comments().map(|comment| comment_row(comment, depth + 1)));
    rows.push(Row {
        key: RowKey::Form(FormTarget::NewComment {
            post_id: post.id.clone(),
        }),
        depth: depth + 1,
        content: RowContent::Form,
    });
    rows
}

/// Name, the posts, then the new-post form.
pub fn blog_rows(blog: &Blog) -> Vec<Row<'_>> {
    let mut rows = vec![Row {
        key: RowKey::Blog(blog.id.clone()),
        depth: 0,
        content: RowContent::Blog { name: &blog.name },
    }];
    for post in blog.posts() {
        rows.extend(post_rows(post, 1));
    }
    rows.push(Row {
        key: RowKey::Form(FormTarget::NewPost {
            blog_id: blog.id.clone(),
        }),
        depth: 1,
        content: RowContent::Form,
    });
    rows
}

/// Every blog followed by the new-blog form.
pub fn page_rows(blogs: &[Blog]) -> Vec<Row<'_>> {
    let mut rows: Vec<Row<'_>> = blogs.iter().flat_map(blog_rows).collect();
    rows.push(Row {
        key: RowKey::Form(FormTarget::NewBlog),
        depth: 0,
        content: RowContent::Form,
    });
    rows
}
