use crossterm::event::KeyCode;
use tracing::{info, warn};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::auth::CredentialVerifier;
use crate::error::FormError;
use crate::models::Credentials;
use crate::ui::components::layout::centered_rect;
use crate::ui::components::toast::Toasts;
use crate::ui::Route;

pub enum LoginAction {
    Exit,
    Navigate(Route),
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LoginField {
    Email,
    Password,
}

/// Once redirected the screen accepts no more submissions
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LoginPhase {
    Editing,
    Redirected,
}

pub struct LoginState {
    pub credentials: Credentials,
    pub current_field: LoginField,
    pub phase: LoginPhase,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            credentials: Credentials::default(),
            current_field: LoginField::Email,
            phase: LoginPhase::Editing,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        let field_value = match self.current_field {
            LoginField::Email => &mut self.credentials.email,
            LoginField::Password => &mut self.credentials.password,
        };

        match key {
            KeyCode::Char(c) => {
                field_value.push(c);
            }
            KeyCode::Backspace => {
                field_value.pop();
            }
            _ => {}
        }
    }

    fn check(&self, verifier: &dyn CredentialVerifier) -> Result<(), FormError> {
        if !self.credentials.is_complete() {
            return Err(FormError::MissingFields);
        }
        if !verifier.verify(&self.credentials) {
            return Err(FormError::InvalidCredentials);
        }
        Ok(())
    }

    pub fn submit(&mut self, verifier: &dyn CredentialVerifier, toasts: &mut Toasts) -> Option<LoginAction> {
        if self.phase == LoginPhase::Redirected {
            return None;
        }

        match self.check(verifier) {
            Ok(()) => {
                info!(email = %self.credentials.email, "login accepted");
                toasts.success("Logged in successfully!");
                self.phase = LoginPhase::Redirected;
                Some(LoginAction::Navigate(Route::Dashboard))
            }
            Err(err) => {
                if err == FormError::InvalidCredentials {
                    warn!(email = %self.credentials.email, "login rejected");
                }
                toasts.error(err.to_string());
                None
            }
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyCode,
        verifier: &dyn CredentialVerifier,
        toasts: &mut Toasts,
    ) -> Option<LoginAction> {
        match key {
            KeyCode::Esc => return Some(LoginAction::Exit),
            KeyCode::Enter => return self.submit(verifier, toasts),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.next_field(),
            _ => self.edit_current_field(key),
        }
        None
    }
}

pub fn render_login<B: Backend>(f: &mut Frame<B>, state: &LoginState) {
    let area = centered_rect(50, 60, f.size());

    let card = Block::default()
        .title(Span::styled("Login", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL);
    let inner = card.inner(area);
    f.render_widget(card, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    let masked = "*".repeat(state.credentials.password.chars().count());
    render_input(f, chunks[0], "Email", &state.credentials.email, "Enter your email", state.current_field == LoginField::Email);
    render_input(f, chunks[1], "Password", &masked, "Enter your password", state.current_field == LoginField::Password);

    let help = Paragraph::new("Enter - Login | Tab - Switch field | Esc - Quit")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[3]);
}

fn render_input<B: Backend>(f: &mut Frame<B>, area: Rect, label: &str, value: &str, placeholder: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let content = if value.is_empty() {
        Spans::from(Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)))
    } else {
        Spans::from(vec![
            Span::raw(value.to_string()),
            Span::raw(if focused { "|" } else { "" }),
        ])
    };

    let input = Paragraph::new(content)
        .block(Block::default().title(label.to_string()).borders(Borders::ALL).border_style(border_style));
    f.render_widget(input, area);
}
