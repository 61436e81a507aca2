//! Login page state

use shared::LoginRequest;
use tui_input::Input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Username,
    Password,
}

pub struct LoginPage {
    pub username: Input,
    pub password: Input,
    pub focus: LoginFocus,
    pub in_flight: bool,
    pub error: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self {
            username: Input::default(),
            password: Input::default(),
            focus: LoginFocus::Username,
            in_flight: false,
            error: None,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginFocus::Username => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Username,
        };
    }

    /// Build the login request; an identifier containing `@` logs in
    /// by email, anything else by username.
    pub fn to_request(&self) -> Option<LoginRequest> {
        let identifier = self.username.value().trim();
        let password = self.password.value();
        if identifier.is_empty() || password.is_empty() {
            return None;
        }
        Some(if identifier.contains('@') {
            LoginRequest::with_email(identifier, password)
        } else {
            LoginRequest::with_username(identifier, password)
        })
    }
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_identifier_selects_email_grant() {
        let mut page = LoginPage::new();
        page.username = Input::new("admin@example.com".into());
        page.password = Input::new("secret".into());
        let request = page.to_request().unwrap();
        assert!(request.email.is_some());
        assert!(request.username.is_none());
    }

    #[test]
    fn empty_credentials_do_not_submit() {
        let page = LoginPage::new();
        assert!(page.to_request().is_none());
    }
}
