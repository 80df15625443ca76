use crate::auth::AuthEvent;
use crate::config::SecureString;
use crate::model::{Blog, CreateBlogInput, CreateCommentInput, CreatePostInput, User};
use crate::ui::forms::{FormInputs, FormTarget, Submission};
use crate::ui::login::{LoginDialogState, LoginIntent, LoginReducer};
use crate::ui::mvi::Reducer;
use crate::ui::session::{SessionIntent, SessionReducer, SessionState};
use crate::ui::views::{page_rows, Row, RowKey};
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopupKind {
    Login,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Page,
    Popup(PopupKind),
}

/// Work handed to the background worker.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    FetchBlogs,
    CreateBlog(CreateBlogInput),
    CreatePost(CreatePostInput),
    CreateComment(CreateCommentInput),
    /// Ask the identity provider who is signed in; answer is tagged with `generation`.
    ResolveUser { generation: u64 },
    SignIn {
        username: String,
        password: SecureString,
    },
    SignOut,
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    /// Latest snapshot from the read query.
    blogs: Vec<Blog>,
    /// Sequence number of the snapshot in `blogs`.
    snapshot_seq: u64,
    selected: Option<RowKey>,
    forms: FormInputs,
    /// Who is signed in (MVI pattern).
    session: SessionState,
    /// Login dialog (MVI pattern).
    login: LoginDialogState,
    command_sender: Option<UiCommandSender>,
    last_command_error: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            focus: Focus::Page,
            blogs: Vec::new(),
            snapshot_seq: 0,
            selected: None,
            forms: FormInputs::default(),
            session: SessionState::default(),
            login: LoginDialogState::default(),
            command_sender: None,
            last_command_error: None,
        }
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.command_sender = Some(sender);
    }

    /// Issue the startup work: one read query and one identity lookup.
    pub fn mount(&mut self) {
        self.send_command(UiCommand::FetchBlogs);
        let generation = self.session.generation();
        self.send_command(UiCommand::ResolveUser { generation });
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn popup_kind(&self) -> Option<PopupKind> {
        match self.focus {
            Focus::Popup(kind) => Some(kind),
            Focus::Page => None,
        }
    }

    pub fn show_popup(&self) -> bool {
        self.popup_kind().is_some()
    }

    // ========================================================================
    // Blog snapshot
    // ========================================================================

    pub fn blogs(&self) -> &[Blog] {
        &self.blogs
    }

    pub fn rows(&self) -> Vec<Row<'_>> {
        page_rows(&self.blogs)
    }

    /// Replace the snapshot unless a newer one was already applied.
    pub fn on_blogs_loaded(&mut self, seq: u64, blogs: Vec<Blog>) {
        if seq < self.snapshot_seq {
            tracing::debug!(seq, current = self.snapshot_seq, "dropping stale snapshot");
            return;
        }
        self.snapshot_seq = seq;
        self.blogs = blogs;
    }

    pub fn request_refresh(&mut self) -> bool {
        self.send_command(UiCommand::FetchBlogs)
    }

    // ========================================================================
    // Selection and forms
    // ========================================================================

    pub fn selected_index(&self) -> usize {
        let rows = self.rows();
        self.selected
            .as_ref()
            .and_then(|key| rows.iter().position(|row| &row.key == key))
            .unwrap_or(0)
    }

    pub fn selected_key(&self) -> Option<RowKey> {
        let rows = self.rows();
        rows.get(self.selected_index()).map(|row| row.key.clone())
    }

    pub fn move_selection(&mut self, delta: isize) {
        let next = {
            let rows = self.rows();
            let current = self.selected_index() as isize;
            let last = rows.len() as isize - 1;
            if last < 0 {
                None
            } else {
                let index = (current + delta).clamp(0, last) as usize;
                Some(rows[index].key.clone())
            }
        };
        self.selected = next;
    }

    pub fn select_first(&mut self) {
        let first = self.rows().first().map(|row| row.key.clone());
        self.selected = first;
    }

    pub fn select_last(&mut self) {
        let last = self.rows().last().map(|row| row.key.clone());
        self.selected = last;
    }

    pub fn select(&mut self, key: RowKey) {
        self.selected = Some(key);
    }

    pub fn forms(&self) -> &FormInputs {
        &self.forms
    }

    pub fn form_text(&self, target: &FormTarget) -> &str {
        self.forms.text(target)
    }

    fn selected_form(&self) -> Option<FormTarget> {
        match self.selected_key() {
            Some(RowKey::Form(target)) => Some(target),
            _ => None,
        }
    }

    /// Type into the selected form. Ignored when no form is selected.
    pub fn type_char(&mut self, ch: char) {
        if let Some(target) = self.selected_form() {
            self.forms.push(&target, ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(target) = self.selected_form() {
            self.forms.pop(&target);
        }
    }

    pub fn submit_selected(&mut self) -> bool {
        match self.selected_form() {
            Some(target) => self.submit_form(&target),
            None => false,
        }
    }

    /// Fire the mutation for `target`.
    ///
    /// The text stays in the form and nothing is inserted locally; the list
    /// changes when the worker's refetch lands.
    pub fn submit_form(&mut self, target: &FormTarget) -> bool {
        let command = match Submission::build(target, self.forms.text(target)) {
            Submission::Blog(input) => UiCommand::CreateBlog(input),
            Submission::Post(input) => UiCommand::CreatePost(input),
            Submission::Comment(input) => UiCommand::CreateComment(input),
        };
        self.send_command(command)
    }

    // ========================================================================
    // Session (MVI pattern)
    // ========================================================================

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    fn dispatch_session(&mut self, intent: SessionIntent) {
        dispatch_mvi!(self, session, SessionReducer, intent);
    }

    /// Identity provider event. SignedIn re-queries the user; SignedOut clears it.
    pub fn on_auth_event(&mut self, event: AuthEvent) {
        self.dispatch_session(SessionIntent::Auth(event));
        if event == AuthEvent::SignedIn {
            if self.popup_kind() == Some(PopupKind::Login) {
                self.close_login();
            }
            let generation = self.session.generation();
            self.send_command(UiCommand::ResolveUser { generation });
        }
    }

    pub fn on_user_resolved(&mut self, generation: u64, user: Option<User>) {
        self.dispatch_session(SessionIntent::Resolved { generation, user });
    }

    pub fn on_user_lookup_failed(&mut self, generation: u64) {
        self.dispatch_session(SessionIntent::ResolveFailed { generation });
    }

    pub fn request_sign_out(&mut self) -> bool {
        self.send_command(UiCommand::SignOut)
    }

    // ========================================================================
    // Login dialog (MVI pattern)
    // ========================================================================

    pub fn login(&self) -> &LoginDialogState {
        &self.login
    }

    pub fn dispatch_login(&mut self, intent: LoginIntent) {
        dispatch_mvi!(self, login, LoginReducer, intent);
        self.focus = if self.login.is_visible() {
            Focus::Popup(PopupKind::Login)
        } else {
            Focus::Page
        };
    }

    pub fn toggle_login(&mut self) {
        self.dispatch_login(LoginIntent::Toggle);
    }

    pub fn close_login(&mut self) {
        self.dispatch_login(LoginIntent::Close);
    }

    pub fn submit_login(&mut self) -> bool {
        if self.login.is_pending() {
            return false;
        }
        let Some((username, password)) = self.login.credentials() else {
            return false;
        };
        let command = UiCommand::SignIn {
            username: username.trim().to_string(),
            password: SecureString::new(password),
        };
        let sent = self.send_command(command);
        if sent {
            self.dispatch_login(LoginIntent::Submitted);
        }
        sent
    }

    pub fn on_login_failed(&mut self, message: String) {
        self.dispatch_login(LoginIntent::Failed(message));
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn last_command_error(&self) -> Option<&str> {
        self.last_command_error.as_deref()
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.command_sender else {
            return false;
        };

        match sender.try_send(command) {
            Ok(()) => {
                self.last_command_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "worker command dropped");
                self.last_command_error = Some(format!("Command not sent: {}", err));
                false
            }
        }
    }
}
