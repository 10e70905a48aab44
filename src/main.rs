mod auth;
mod config;
mod error;
mod logging;
mod models;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, error, info};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::auth::{CredentialVerifier, StaticCredentials};
use crate::ui::{
    components::toast::{render_toasts, Toasts},
    invoice_form::{render_invoice_form, InvoiceFormAction, InvoiceFormState},
    login::{render_login, LoginAction, LoginState},
    Route,
};

/// How long to wait for input before redrawing, so toasts can expire
const TICK: Duration = Duration::from_millis(250);

// Main application state
struct AppState {
    screen: Route,
    verifier: Box<dyn CredentialVerifier>,
    toasts: Toasts,
    login_state: Option<LoginState>,
    invoice_form_state: Option<InvoiceFormState>,
}

impl AppState {
    fn new(config: &config::Config) -> Self {
        let mut app_state = Self {
            screen: Route::Login,
            verifier: Box::new(StaticCredentials::from_config(config)),
            toasts: Toasts::new(config.toast_ttl()),
            login_state: None,
            invoice_form_state: None,
        };
        app_state.navigate(Route::Login);
        app_state
    }

    /// Swap screens. Each screen starts from a fresh state.
    fn navigate(&mut self, route: Route) {
        match route {
            Route::Login => {
                self.login_state = Some(LoginState::new());
                self.invoice_form_state = None;
            }
            Route::Dashboard => {
                self.invoice_form_state = Some(InvoiceFormState::new());
                self.login_state = None;
            }
        }
        info!(?route, "navigated");
        self.screen = route;
    }
}

fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;
    let _log_guard = logging::init(&config)?;
    info!(log_file = %config.log_file, "starting invoice desk");

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(&config);

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show any error message
    if let Err(err) = result {
        error!(%err, "invoice desk stopped");
        println!("Error: {}", err);
    }

    println!("Thanks for using Invoice Desk!");

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        if app_state.toasts.prune(Local::now()) {
            debug!(remaining = app_state.toasts.len(), "expired toasts removed");
        }

        // Render current screen
        terminal.draw(|f| {
            match app_state.screen {
                Route::Login => {
                    if let Some(state) = &app_state.login_state {
                        render_login(f, state);
                    }
                }
                Route::Dashboard => {
                    if let Some(state) = &mut app_state.invoice_form_state {
                        render_invoice_form(f, state);
                    }
                }
            }
            render_toasts(f, &app_state.toasts);
        })?;

        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let should_quit = match app_state.screen {
                Route::Login => handle_login_screen(app_state, key.code),
                Route::Dashboard => handle_dashboard_screen(app_state, key.code),
            };

            if should_quit {
                break;
            }
        }
    }

    Ok(())
}

fn handle_login_screen(app_state: &mut AppState, key: KeyCode) -> bool {
    let action = match &mut app_state.login_state {
        Some(state) => state.handle_key(key, app_state.verifier.as_ref(), &mut app_state.toasts),
        None => None,
    };

    match action {
        Some(LoginAction::Exit) => true,
        Some(LoginAction::Navigate(route)) => {
            app_state.navigate(route);
            false
        }
        None => false,
    }
}

fn handle_dashboard_screen(app_state: &mut AppState, key: KeyCode) -> bool {
    let action = match &mut app_state.invoice_form_state {
        Some(state) => state.handle_key(key, &mut app_state.toasts),
        None => None,
    };

    matches!(action, Some(InvoiceFormAction::Exit))
}
