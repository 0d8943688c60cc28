use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use hotelier_core::utils::{format_optional, format_price, truncate_string};

use crate::app::{App, DESCRIPTION_LIMIT};
use crate::ui::styles;

pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let signed_in = app.session.is_signed_in();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to Hotelier", styles::title_style())),
        Line::from(Span::styled(
            format!("Signed in as {}", app.user_tag()),
            styles::muted_style(),
        )),
        Line::from(""),
        shortcut("r", "Browse rooms"),
        shortcut("c", "Room categories"),
        shortcut("a", "Admin dashboard"),
    ];
    if signed_in {
        lines.push(shortcut("L", "Log out"));
    } else {
        lines.push(shortcut("l", "Log in"));
    }
    lines.push(shortcut("/", "Go to a path"));

    let block = Block::default()
        .title(" Home ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}

fn shortcut(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{}] ", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

pub fn render_rooms(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .rooms
        .iter()
        .map(|room| {
            Row::new(vec![
                Cell::from(room.room_id.to_string()),
                Cell::from(room.category.clone()),
                Cell::from(room.max_guests.to_string()),
                Cell::from(room.available_display()).style(styles::flag_style(!room.available)),
                Cell::from(truncate_string(
                    &format_optional(&room.special_description, ""),
                    DESCRIPTION_LIMIT,
                )),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Fill(2),
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Fill(4),
    ];

    let header = Row::new(["Room", "Category", "Guests", "Available", "About"])
        .style(styles::header_style());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Rooms ({}) ", app.rooms.len()))
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, area, &mut state);
}

pub fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .public_categories
        .iter()
        .map(|category| {
            Row::new(vec![
                Cell::from(category.name.clone()),
                Cell::from(format_price(category.price)),
                Cell::from(truncate_string(&category.features_display(), DESCRIPTION_LIMIT)),
                Cell::from(truncate_string(&category.description, DESCRIPTION_LIMIT)),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Fill(3),
        Constraint::Fill(4),
    ];

    let header = Row::new(["Category", "Per night", "Features", "Description"])
        .style(styles::header_style());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Categories ({}) ", app.public_categories.len()))
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, area, &mut state);
}
