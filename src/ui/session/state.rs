use crate::model::User;
use crate::ui::mvi::UiState;

/// Who is signed in.
///
/// `generation` counts identity events seen so far. A user lookup carries the
/// generation it was issued at and is ignored once a newer event arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut { generation: u64 },
    SignedIn { user: User, generation: u64 },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::SignedOut { generation: 0 }
    }
}

impl UiState for SessionState {}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::SignedIn { user, .. } => Some(user),
            SessionState::SignedOut { .. } => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }

    pub fn generation(&self) -> u64 {
        match self {
            SessionState::SignedOut { generation } | SessionState::SignedIn { generation, .. } => {
                *generation
            }
        }
    }
}
