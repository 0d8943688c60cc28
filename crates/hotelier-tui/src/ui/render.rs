use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use hotelier_core::{AdminSection, Route};

use crate::app::{App, AppState};

use super::styles;
use super::views::{admin, login, public};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Length(2), // Navigation
            Constraint::Min(8),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_nav(frame, app, chunks[1]);
    render_page(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::EnteringPath => render_path_overlay(frame, app),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        AppState::Editing => render_edit_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Hotelier";
    let user = format!("{}  [?] Help ", app.user_tag());
    let padding = (area.width as usize).saturating_sub(title.len() + user.chars().count());

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(user, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_nav(frame: &mut Frame, app: &App, area: Rect) {
    let entries = [
        ("[h]ome", app.route == Route::Home),
        ("[r]ooms", app.route == Route::Rooms),
        ("[c]ategories", app.route == Route::Categories),
        ("[a]dmin", app.route.requires_admin()),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let style = if *selected {
            styles::tab_style(true)
        } else {
            styles::muted_style()
        };
        spans.push(Span::styled(*label, style));
    }

    let path = app.route.path();
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(used + path.len() + 1);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(path, styles::muted_style()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Home => public::render_home(frame, app, area),
        Route::Rooms => public::render_rooms(frame, app, area),
        Route::Categories => public::render_categories(frame, app, area),
        Route::Login => login::render(frame, app, area),
        Route::Admin(section) => admin::render(frame, app, section, area),
    }
}

fn shortcuts(app: &App) -> &'static str {
    match app.route {
        Route::Admin(section) if app.guard_state.may_render() && section.has_backend() => {
            match section {
                AdminSection::Users => {
                    "[e]dit [t]oggle [b]lock [d]elete | ←/→ page [s]ize | [q]uit"
                }
                AdminSection::Rooms => "[u]pdate | Tab section | [q]uit",
                _ => "[e]dit [t]oggle [d]elete | ←/→ page [s]ize | [q]uit",
            }
        }
        Route::Login => "Tab next field | Enter submit | Esc back",
        _ => "[/] path | [q]uit",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = match app.notice {
        Some(ref notice) => (format!(" {} ", notice.text), styles::notice_style(notice.kind)),
        None => (String::new(), styles::muted_style()),
    };
    let right_text = format!(" {} ", shortcuts(app));
    let padding = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 25, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            format!("  Hotelier  version {}", version),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("h r c a", "Home, rooms, categories, admin"),
        help_line("/", "Go to a path (e.g. /admin/users)"),
        help_line("l / L", "Log in / log out"),
        help_line("↑/↓", "Move selection"),
        help_line("Tab", "Next dashboard section"),
        Line::from(""),
        Line::from(Span::styled(" Dashboard", styles::highlight_style())),
        help_line("←/→", "Previous/next page"),
        help_line("Home/End", "First/last page"),
        help_line("s", "Cycle page size"),
        help_line("e", "Edit selected row"),
        help_line("t", "Enable/disable selected row"),
        help_line("b", "Block/unblock selected user"),
        help_line("d", "Delete selected row"),
        help_line("u", "Refresh"),
        Line::from(""),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    frame.render_widget(Paragraph::new(help_text).block(overlay_block(" Help ")), area);
}

fn render_path_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Path: ", styles::muted_style()),
            Span::styled(format!("{}▌", app.path_input), styles::selected_style()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(overlay_block(" Go to ")), area);
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let Some(ref pending) = app.pending_delete else {
        return;
    };
    let area = centered_rect_fixed(52, 9, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Are you sure?", styles::highlight_style())),
        Line::from(""),
        Line::from(Span::raw(format!("  {}", pending.prompt()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to delete, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(overlay_block(" Delete "));
    frame.render_widget(paragraph, area);
}

fn render_edit_overlay(frame: &mut Frame, app: &App) {
    let Some(ref form) = app.edit_form else {
        return;
    };

    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus && field.editable;
        let value_style = if !field.editable {
            styles::muted_style()
        } else if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", field.label), styles::muted_style()),
            Span::styled(format!("{}{}", field.value, cursor), value_style),
        ]));
        if let Some(error) = form.error_for(field.key) {
            lines.push(Line::from(Span::styled(
                format!("  {:<12}{}", "", error.message),
                styles::error_style(),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  ", styles::muted_style()),
        Span::styled("[Enter]", styles::help_key_style()),
        Span::styled(" save  ", styles::muted_style()),
        Span::styled("[Tab]", styles::help_key_style()),
        Span::styled(" next field  ", styles::muted_style()),
        Span::styled("[Esc]", styles::help_key_style()),
        Span::styled(" cancel", styles::muted_style()),
    ]));

    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(64, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(overlay_block(form.title())), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 6, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(overlay_block(" Quit ")), area);
}

fn overlay_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default())
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect_fixed(40, 10, outer);
        assert_eq!(inner, Rect::new(30, 15, 40, 10));

        let small = Rect::new(0, 0, 20, 5);
        let clipped = centered_rect_fixed(40, 10, small);
        assert_eq!(clipped, Rect::new(0, 0, 20, 5));
    }
}
