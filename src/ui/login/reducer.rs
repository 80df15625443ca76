use crate::ui::login::intent::LoginIntent;
use crate::ui::login::state::{LoginDialogState, LoginField};
use crate::ui::mvi::Reducer;

pub struct LoginReducer;

impl Reducer for LoginReducer {
    type State = LoginDialogState;
    type Intent = LoginIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LoginIntent::Toggle => match state {
                LoginDialogState::Hidden => LoginDialogState::Visible {
                    username: String::new(),
                    password: String::new(),
                    focused: LoginField::Username,
                    pending: false,
                    error: None,
                },
                LoginDialogState::Visible { .. } => LoginDialogState::Hidden,
            },
            LoginIntent::Close => LoginDialogState::Hidden,
            LoginIntent::Type(ch) => match state {
                LoginDialogState::Visible {
                    mut username,
                    mut password,
                    focused,
                    pending: false,
                    ..
                } => {
                    match focused {
                        LoginField::Username => username.push(ch),
                        LoginField::Password => password.push(ch),
                    }
                    LoginDialogState::Visible {
                        username,
                        password,
                        focused,
                        pending: false,
                        error: None,
                    }
                }
                other => other,
            },
            LoginIntent::Backspace => match state {
                LoginDialogState::Visible {
                    mut username,
                    mut password,
                    focused,
                    pending: false,
                    error,
                } => {
                    match focused {
                        LoginField::Username => username.pop(),
                        LoginField::Password => password.pop(),
                    };
                    LoginDialogState::Visible {
                        username,
                        password,
                        focused,
                        pending: false,
                        error,
                    }
                }
                other => other,
            },
            LoginIntent::SwitchField => match state {
                LoginDialogState::Visible {
                    username,
                    password,
                    focused,
                    pending,
                    error,
                } => LoginDialogState::Visible {
                    username,
                    password,
                    focused: match focused {
                        LoginField::Username => LoginField::Password,
                        LoginField::Password => LoginField::Username,
                    },
                    pending,
                    error,
                },
                other => other,
            },
            LoginIntent::Submitted => match state {
                LoginDialogState::Visible {
                    username,
                    password,
                    focused,
                    ..
                } => LoginDialogState::Visible {
                    username,
                    password,
                    focused,
                    pending: true,
                    error: None,
                },
                other => other,
            },
            LoginIntent::Failed(message) => match state {
                LoginDialogState::Visible { username, .. } => LoginDialogState::Visible {
                    username,
                    password: String::new(),
                    focused: LoginField::Password,
                    pending: false,
                    error: Some(message),
                },
                other => other,
            },
        }
    }
}
