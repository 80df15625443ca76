//! GraphQL documents sent to the backend.

/// A named operation and the root field its payload lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
    pub root_field: &'static str,
}

/// Blogs → posts → comments, ten of each per level.
pub const TOP_PAGE: Operation = Operation {
    name: "TopPage",
    root_field: "listBlogs",
    document: r#"
  query TopPage {
    listBlogs(limit: 10) {
      items {
        id
        name
        posts(limit: 10) {
          items {
            id
            title
            createdAt
            comments(limit: 10) {
              items {
                id
                content
              }
            }
          }
        }
      }
    }
  }
"#,
};

pub const NEW_BLOG: Operation = Operation {
    name: "NewBlog",
    root_field: "createBlog",
    document: r#"
  mutation NewBlog($input: CreateBlogInput!) {
    createBlog(input: $input) {
      id
    }
  }
"#,
};

pub const NEW_POST: Operation = Operation {
    name: "NewPost",
    root_field: "createPost",
    document: r#"
  mutation NewPost($input: CreatePostInput!) {
    createPost(input: $input) {
      id
    }
  }
"#,
};

pub const NEW_COMMENT: Operation = Operation {
    name: "NewComment",
    root_field: "createComment",
    document: r#"
  mutation NewComment($input: CreateCommentInput!) {
    createComment(input: $input) {
      id
    }
  }
"#,
};
