use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum LoginIntent {
    /// Show the dialog if hidden, hide it otherwise.
    Toggle,
    Close,
    Type(char),
    Backspace,
    SwitchField,
    /// Credentials were handed to the identity provider.
    Submitted,
    Failed(String),
}

impl Intent for LoginIntent {}
