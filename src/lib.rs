//! Terminal front end for a hosted blog backend.
//!
//! Blogs, posts and comments are read through a single GraphQL query and
//! created through three mutations. Sign-in is delegated to a hosted
//! identity provider.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod shutdown;
pub mod ui;
