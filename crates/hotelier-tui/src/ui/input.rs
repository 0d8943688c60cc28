//! Keyboard input handling for the TUI.
//!
//! Translates key events into navigation and dashboard actions on `App`.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use hotelier_core::models::Pagination;
use hotelier_core::{AdminSection, Route};

use crate::app::{
    can_add_email_char, can_add_field_char, can_add_password_char, can_add_path_char, App,
    AppState, LoginFocus,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.confirm_delete().await;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
                _ => {}
            }
            return Ok(false);
        }
        AppState::EnteringPath => {
            handle_path_input(app, key).await;
            return Ok(false);
        }
        AppState::Editing => {
            handle_edit_input(app, key).await;
            return Ok(false);
        }
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    if app.route == Route::Login {
        handle_login_input(app, key).await;
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('/') => {
            app.path_input = "/".to_string();
            app.state = AppState::EnteringPath;
            return Ok(false);
        }
        KeyCode::Char('h') => app.open(Route::Home).await,
        KeyCode::Char('r') => app.open(Route::Rooms).await,
        KeyCode::Char('c') => app.open(Route::Categories).await,
        KeyCode::Char('a') => {
            if !app.route.requires_admin() {
                app.open(Route::ADMIN).await;
            }
        }
        KeyCode::Char('l') => {
            if !app.session.is_signed_in() {
                app.navigate(Route::Login);
            }
        }
        KeyCode::Char('L') => app.logout().await,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        _ => {
            if let Some(section) = app.current_section() {
                handle_dashboard_input(app, section, key).await;
            }
        }
    }

    Ok(false)
}

async fn handle_dashboard_input(app: &mut App, section: AdminSection, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.open(Route::Admin(section.next())).await,
        KeyCode::BackTab => app.open(Route::Admin(section.prev())).await,
        KeyCode::Right => app.change_page(Pagination::next).await,
        KeyCode::Left => app.change_page(Pagination::prev).await,
        KeyCode::Home => app.change_page(Pagination::first).await,
        KeyCode::End => app.change_page(Pagination::last).await,
        KeyCode::Char('s') => app.cycle_page_size().await,
        KeyCode::Char('t') => app.toggle_selected().await,
        KeyCode::Char('b') => app.toggle_block_selected().await,
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('e') => app.request_edit(),
        KeyCode::Char('u') => app.refresh_admin().await,
        _ => {}
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.login_password.clear();
            app.open(Route::Home).await;
        }
        KeyCode::Down | KeyCode::Tab => app.login_focus = app.login_focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.login_focus = app.login_focus.prev(),
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => app.login_focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => {
                // Failures land in login_error.
                let _ = app.attempt_login().await;
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => {
                if can_add_email_char(app.login_email.chars().count(), c) {
                    app.login_email.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
}

async fn handle_path_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.path_input.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            let path = std::mem::take(&mut app.path_input);
            app.state = AppState::Normal;
            app.open_path(&path).await;
        }
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Char(c) => {
            if can_add_path_char(c) {
                app.path_input.push(c);
            }
        }
        _ => {}
    }
}

async fn handle_edit_input(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc) {
        app.cancel_edit();
        return;
    }
    if matches!(key.code, KeyCode::Enter) {
        app.submit_edit().await;
        return;
    }

    let Some(form) = app.edit_form.as_mut() else {
        app.cancel_edit();
        return;
    };
    match key.code {
        KeyCode::Down | KeyCode::Tab => form.focus_next(),
        KeyCode::Up | KeyCode::BackTab => form.focus_prev(),
        KeyCode::Backspace => {
            if let Some(field) = form.focused_mut() {
                field.value.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = form.focused_mut() {
                if can_add_field_char(field.value.chars().count(), c) {
                    field.value.push(c);
                }
            }
        }
        _ => {}
    }
}
