use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoginDialogState {
    #[default]
    Hidden,
    Visible {
        username: String,
        password: String,
        focused: LoginField,
        /// Waiting for the identity provider.
        pending: bool,
        error: Option<String>,
    },
}

impl UiState for LoginDialogState {}

impl LoginDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Visible { pending: true, .. })
    }

    /// Username and password, if the dialog is open.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match self {
            Self::Visible {
                username, password, ..
            } => Some((username.as_str(), password.as_str())),
            Self::Hidden => None,
        }
    }
}
