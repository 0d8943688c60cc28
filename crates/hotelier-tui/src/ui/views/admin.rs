//! Admin dashboard: section sidebar plus one paged table per section.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState},
    Frame,
};

use hotelier_core::models::Pagination;
use hotelier_core::utils::{format_optional, format_price, truncate_string};
use hotelier_core::AdminSection;

use crate::app::{App, DESCRIPTION_LIMIT};
use crate::ui::styles;

const SIDEBAR_WIDTH: u16 = 22;

pub fn render(frame: &mut Frame, app: &App, section: AdminSection, area: Rect) {
    // Nothing protected is drawn until the guard has let the session in.
    if !app.guard_state.may_render() {
        render_loading(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, section, chunks[0]);

    match section {
        AdminSection::Users => render_users(frame, app, chunks[1]),
        AdminSection::Categories => render_categories(frame, app, chunks[1]),
        AdminSection::GalleryItems => render_gallery(frame, app, chunks[1]),
        AdminSection::Rooms => render_rooms(frame, app, chunks[1]),
        AdminSection::Bookings | AdminSection::Feedback | AdminSection::Tickets => {
            render_empty_section(frame, section, chunks[1])
        }
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled("Loading...", styles::muted_style())))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(styles::border_style(false)));
    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame, current: AdminSection, area: Rect) {
    let items: Vec<ListItem> = AdminSection::ALL
        .iter()
        .map(|section| {
            let style = if *section == current {
                styles::selected_style()
            } else if section.has_backend() {
                styles::list_item_style()
            } else {
                styles::muted_style()
            };
            ListItem::new(Line::from(format!(" {}", section.title()))).style(style)
        })
        .collect();

    let block = Block::default()
        .title(" Dashboard ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(List::new(items).block(block), area);
}

fn table_block(title: String, page: Option<&Pagination>) -> Block<'static> {
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    match page {
        Some(page) => block.title_bottom(
            Line::from(format!(
                " {}  page {}/{}  size {} ",
                page.range_label(),
                page.page_index + 1,
                page.last_page() + 1,
                page.page_size
            ))
            .right_aligned(),
        ),
        None => block,
    }
}

fn render_table(frame: &mut Frame, app: &App, table: Table, area: Rect) {
    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn header(cells: &[&'static str]) -> Row<'static> {
    Row::new(cells.iter().map(|c| Cell::from(*c)))
        .style(styles::header_style())
        .height(1)
}

fn flag_cell(text: &'static str, raised: bool) -> Cell<'static> {
    Cell::from(text).style(styles::flag_style(raised))
}

fn render_users(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.pagination(AdminSection::Users);

    let rows: Vec<Row> = app
        .users
        .items
        .iter()
        .enumerate()
        .map(|(i, user)| {
            Row::new(vec![
                Cell::from(page.row_number(i).to_string()),
                Cell::from(user.full_name()),
                Cell::from(user.email.clone()),
                Cell::from(format_optional(&user.phone, "-")),
                Cell::from(user.role.to_string()),
                flag_cell(user.status_display(), user.disabled),
                flag_cell(user.blocked_display(), user.blocked),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["#", "Name", "E-mail", "Phone", "Type", "Status", "Access"]))
        .block(table_block(format!(" Users ({}) ", page.total_count), Some(&page)))
        .row_highlight_style(styles::selected_style());

    render_table(frame, app, table, area);
}

fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.pagination(AdminSection::Categories);

    let rows: Vec<Row> = app
        .categories
        .items
        .iter()
        .enumerate()
        .map(|(i, category)| {
            Row::new(vec![
                Cell::from(page.row_number(i).to_string()),
                Cell::from(category.name.clone()),
                Cell::from(format_price(category.price)),
                Cell::from(truncate_string(&category.features_display(), DESCRIPTION_LIMIT)),
                Cell::from(truncate_string(&category.description, DESCRIPTION_LIMIT)),
                flag_cell(if category.disabled { "Disabled" } else { "Enabled" }, category.disabled),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Fill(3),
        Constraint::Fill(4),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["#", "Name", "Price", "Features", "Description", "Status"]))
        .block(table_block(format!(" Categories ({}) ", page.total_count), Some(&page)))
        .row_highlight_style(styles::selected_style());

    render_table(frame, app, table, area);
}

fn render_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.pagination(AdminSection::GalleryItems);

    let rows: Vec<Row> = app
        .gallery
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Row::new(vec![
                Cell::from(page.row_number(i).to_string()),
                Cell::from(item.name.clone()),
                Cell::from(truncate_string(&item.description, DESCRIPTION_LIMIT)),
                Cell::from(if item.image.is_some() { "yes" } else { "-" }),
                flag_cell(if item.disabled { "Disabled" } else { "Enabled" }, item.disabled),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Fill(2),
        Constraint::Fill(4),
        Constraint::Length(6),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["#", "Name", "Description", "Image", "Status"]))
        .block(table_block(format!(" Gallery Items ({}) ", page.total_count), Some(&page)))
        .row_highlight_style(styles::selected_style());

    render_table(frame, app, table, area);
}

fn render_rooms(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .rooms
        .iter()
        .map(|room| {
            Row::new(vec![
                Cell::from(room.room_id.to_string()),
                Cell::from(room.category.clone()),
                Cell::from(room.max_guests.to_string()),
                flag_cell(room.available_display(), !room.available),
                Cell::from(truncate_string(
                    &format_optional(&room.special_description, "-"),
                    DESCRIPTION_LIMIT,
                )),
                Cell::from(room.photos.len().to_string()),
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
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["Room", "Category", "Guests", "Available", "Special", "Photos"]))
        .block(table_block(format!(" Rooms ({}) ", app.rooms.len()), None))
        .row_highlight_style(styles::selected_style());

    render_table(frame, app, table, area);
}

fn render_empty_section(frame: &mut Frame, section: AdminSection, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No {} to show.", section.title().to_lowercase()),
            styles::muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(table_block(format!(" {} ", section.title()), None));
    frame.render_widget(paragraph, area);
}
