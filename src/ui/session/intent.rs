use crate::auth::AuthEvent;
use crate::model::User;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// Event from the identity provider subscription.
    Auth(AuthEvent),
    /// Answer to a "current user" query issued at `generation`.
    Resolved {
        generation: u64,
        user: Option<User>,
    },
    /// The lookup issued at `generation` failed for a reason other than
    /// nobody being signed in.
    ResolveFailed { generation: u64 },
}

impl Intent for SessionIntent {}
