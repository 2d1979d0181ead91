use crate::logger;
use crate::models::{AppState, AuthField, AuthForm, AuthMode, NetRequest, UserIdentity};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const MIN_PASSWORD_LEN: usize = 6;

pub fn handle_auth_input(
    form: &mut AuthForm,
    key: KeyEvent,
    app_state: &mut AppState,
    net_tx: Option<&Sender<NetRequest>>,
) {
    if key.code == KeyCode::Esc {
        if form.in_progress {
            logger::log("Auth form closed with a request in flight");
            form.in_progress = false;
        }
        *app_state = AppState::Home;
        return;
    }
    if form.in_progress {
        return;
    }

    match key.code {
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.toggle_mode();
        }
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => {
            form.field_mut().pop();
        }
        KeyCode::Char(c) => form.field_mut().push(c),
        KeyCode::Enter => {
            if form.fields().last() != Some(&form.focused) {
                form.focus_next();
            } else {
                form.submit(net_tx);
            }
        }
        _ => {}
    }
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        let mut form = Self {
            mode,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            focused: AuthField::Email,
            error: None,
            in_progress: false,
        };
        form.focused = form.fields()[0];
        form
    }

    /// Fields in tab order for the current mode.
    pub fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Signup => &[AuthField::Username, AuthField::Email, AuthField::Password],
        }
    }

    pub fn field(&self, field: AuthField) -> &str {
        match field {
            AuthField::Username => &self.username,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focused {
            AuthField::Username => &mut self.username,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    fn focus_offset(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.focused = fields[next];
    }

    fn focus_next(&mut self) {
        self.focus_offset(true);
    }

    fn focus_prev(&mut self) {
        self.focus_offset(false);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.error = None;
        self.password.clear();
        self.focused = self.fields()[0];
    }

    fn validate(&self) -> Result<(), String> {
        if self.mode == AuthMode::Signup && self.username.trim().is_empty() {
            return Err("Username is required".to_string());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("Please enter a valid email address".to_string());
        }
        if self.mode == AuthMode::Signup && self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }

    pub fn submit(&mut self, net_tx: Option<&Sender<NetRequest>>) {
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return;
        }
        let Some(tx) = net_tx else {
            self.error = Some("Accounts are not configured".to_string());
            return;
        };

        let request = match self.mode {
            AuthMode::Login => NetRequest::SignIn {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
            },
            AuthMode::Signup => NetRequest::SignUp {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
                username: self.username.trim().to_string(),
            },
        };

        if tx.send(request).is_err() {
            logger::log("Network worker is gone, cannot submit auth form");
            self.error = Some("Network worker unavailable".to_string());
            return;
        }
        self.error = None;
        self.in_progress = true;
    }

    /// A failed attempt keeps the typed fields and shows the provider's message.
    pub fn fail(&mut self, message: String) {
        self.in_progress = false;
        self.password.clear();
        self.error = Some(message);
    }

    /// Success clears the form; the caller stores the identity and leaves the screen.
    pub fn succeed(&mut self, user: &UserIdentity) {
        logger::log(&format!("Auth form completed for {}", user.uid));
        *self = Self::new(self.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut AuthForm, state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_auth_input(form, key(KeyCode::Char(c)), state, None);
        }
    }

    #[test]
    fn test_login_form_starts_on_email() {
        let form = AuthForm::new(AuthMode::Login);
        assert_eq!(form.focused, AuthField::Email);
        assert_eq!(form.fields().len(), 2);

        let form = AuthForm::new(AuthMode::Signup);
        assert_eq!(form.focused, AuthField::Username);
    }

    #[test]
    fn test_typing_and_tabbing() {
        let mut form = AuthForm::new(AuthMode::Login);
        let mut state = AppState::Auth;

        type_text(&mut form, &mut state, "a@b.io");
        handle_auth_input(&mut form, key(KeyCode::Tab), &mut state, None);
        type_text(&mut form, &mut state, "secret");
        handle_auth_input(&mut form, key(KeyCode::Backspace), &mut state, None);

        assert_eq!(form.email, "a@b.io");
        assert_eq!(form.password, "secre");
        assert_eq!(form.focused, AuthField::Password);

        handle_auth_input(&mut form, key(KeyCode::Tab), &mut state, None);
        assert_eq!(form.focused, AuthField::Email);
        handle_auth_input(&mut form, key(KeyCode::BackTab), &mut state, None);
        assert_eq!(form.focused, AuthField::Password);
    }

    #[test]
    fn test_ctrl_t_toggles_mode() {
        let mut form = AuthForm::new(AuthMode::Login);
        let mut state = AppState::Auth;
        form.error = Some("old".to_string());

        let toggle = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
        handle_auth_input(&mut form, toggle, &mut state, None);

        assert_eq!(form.mode, AuthMode::Signup);
        assert_eq!(form.focused, AuthField::Username);
        assert!(form.error.is_none());
        assert!(form.username.is_empty());
    }

    #[test]
    fn test_submit_sends_sign_in() {
        let (tx, rx) = unbounded();
        let mut form = AuthForm::new(AuthMode::Login);
        form.email = " user@example.com ".to_string();
        form.password = "hunter22".to_string();
        form.focused = AuthField::Password;
        let mut state = AppState::Auth;

        handle_auth_input(&mut form, key(KeyCode::Enter), &mut state, Some(&tx));

        assert!(form.in_progress);
        assert_eq!(
            rx.try_recv().unwrap(),
            NetRequest::SignIn {
                email: "user@example.com".to_string(),
                password: "hunter22".to_string(),
            }
        );

        // Input is ignored while the request is in flight.
        handle_auth_input(&mut form, key(KeyCode::Char('x')), &mut state, Some(&tx));
        assert_eq!(form.password, "hunter22");
    }

    #[test]
    fn test_enter_on_earlier_field_moves_focus() {
        let (tx, rx) = unbounded();
        let mut form = AuthForm::new(AuthMode::Login);
        let mut state = AppState::Auth;

        handle_auth_input(&mut form, key(KeyCode::Enter), &mut state, Some(&tx));
        assert_eq!(form.focused, AuthField::Password);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_signup_validation() {
        let (tx, rx) = unbounded();
        let mut form = AuthForm::new(AuthMode::Signup);
        form.email = "user@example.com".to_string();
        form.password = "longenough".to_string();

        form.submit(Some(&tx));
        assert_eq!(form.error.as_deref(), Some("Username is required"));

        form.username = "quizzer".to_string();
        form.password = "123".to_string();
        form.submit(Some(&tx));
        assert_eq!(
            form.error.as_deref(),
            Some("Password should be at least 6 characters")
        );
        assert!(rx.try_recv().is_err());

        form.password = "123456".to_string();
        form.submit(Some(&tx));
        assert!(form.error.is_none());
        assert!(matches!(
            rx.try_recv().unwrap(),
            NetRequest::SignUp { ref username, .. } if username == "quizzer"
        ));
    }

    #[test]
    fn test_submit_without_accounts_shows_error() {
        let mut form = AuthForm::new(AuthMode::Login);
        form.email = "user@example.com".to_string();
        form.password = "pw".to_string();

        form.submit(None);

        assert!(!form.in_progress);
        assert_eq!(form.error.as_deref(), Some("Accounts are not configured"));
    }

    #[test]
    fn test_failure_keeps_email_and_shows_message() {
        let mut form = AuthForm::new(AuthMode::Login);
        form.email = "user@example.com".to_string();
        form.password = "pw".to_string();
        form.in_progress = true;

        form.fail("INVALID_LOGIN_CREDENTIALS".to_string());

        assert!(!form.in_progress);
        assert_eq!(form.email, "user@example.com");
        assert!(form.password.is_empty());
        assert_eq!(form.error.as_deref(), Some("INVALID_LOGIN_CREDENTIALS"));
    }

    #[test]
    fn test_escape_leaves_even_while_waiting() {
        let mut form = AuthForm::new(AuthMode::Login);
        form.in_progress = true;
        let mut state = AppState::Auth;

        handle_auth_input(&mut form, key(KeyCode::Esc), &mut state, None);
        assert_eq!(state, AppState::Home);
        assert!(!form.in_progress);
    }
}
