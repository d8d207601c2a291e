//! Container table with pagination and the per-row action menu.

use crate::nav::Focus;
use crate::state::{App, ContainerListView, ListDisplay, RowAction};
use crate::theme::{alert_color, container_status_color, container_type_color};
use crate::views::helpers::anchored_popup;
use crate::widgets::StatusMessage;
use cropdeck_core::{timestamp, Container};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Row, Table, TableState},
    Frame,
};

const HEADERS: [&str; 9] = [
    "Name", "Type", "Tenant", "Purpose", "Location", "Status", "Created", "Modified", "Alerts",
];

/// Cell text for one row, in `HEADERS` order.
pub fn row_cells(container: &Container) -> [String; 9] {
    [
        container.name.clone(),
        container.container_type.label().to_string(),
        container.tenant.clone(),
        container.purpose.label().to_string(),
        container.location_text(),
        container.status.label().to_string(),
        timestamp::format_date(&container.created),
        timestamp::format_date(&container.modified),
        if container.has_alert { "!" } else { "" }.to_string(),
    ]
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::List;
    let containers = app.containers.containers();
    let pagination = &app.list.pagination;
    let title = format!(
        "Containers | {} | Rows per page: {}",
        pagination.label(containers.len()),
        pagination.rows_per_page
    );

    match ContainerListView::display(&app.containers) {
        ListDisplay::Loading => StatusMessage {
            title: "Containers",
            message: "Loading containers...".to_string(),
            hint: None,
            style: Style::default().fg(app.theme.text),
            hint_style: Style::default().fg(app.theme.text_dim),
        }
        .render(f, area),
        ListDisplay::Error(message) => StatusMessage {
            title: "Containers",
            message,
            hint: Some("Press r to retry"),
            style: Style::default().fg(app.theme.error),
            hint_style: Style::default().fg(app.theme.text_dim),
        }
        .render(f, area),
        ListDisplay::Table => {
            let rows: Vec<Row> = app
                .list
                .visible(containers)
                .iter()
                .map(|container| {
                    let cells = row_cells(container);
                    let colors = [
                        app.theme.text,
                        container_type_color(container.container_type, &app.theme),
                        app.theme.text,
                        app.theme.text,
                        app.theme.text_dim,
                        container_status_color(container.status, &app.theme),
                        app.theme.text_dim,
                        app.theme.text_dim,
                        alert_color(container.has_alert, &app.theme),
                    ];
                    Row::new(
                        cells
                            .into_iter()
                            .zip(colors)
                            .map(|(text, color)| Cell::from(text).style(Style::default().fg(color))),
                    )
                })
                .collect();

            let widths = [
                Constraint::Percentage(16),
                Constraint::Percentage(9),
                Constraint::Percentage(12),
                Constraint::Percentage(11),
                Constraint::Percentage(15),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(7),
            ];
            let header = Row::new(HEADERS.iter().map(|h| {
                Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))
            }));
            let table = Table::new(rows, widths)
                .header(header)
                .block(
                    Block::default()
                        .title(Span::styled(title, Style::default().fg(app.theme.primary)))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(app.theme.border_for(focused))),
                )
                .highlight_style(Style::default().bg(app.theme.bg_highlight));

            let mut state = TableState::default();
            if !app.list.visible(containers).is_empty() {
                state.select(Some(app.list.cursor));
            }
            f.render_stateful_widget(table, area, &mut state);

            if app.list.menu.is_some() {
                render_menu(f, app, area);
            }
        }
    }
}

fn render_menu(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(menu) = app.list.menu.as_ref() else {
        return;
    };
    let popup = anchored_popup(area, app.list.cursor as u16 + 2, 16, 5);
    let items: Vec<ListItem> = RowAction::all()
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();
    let mut state = ListState::default();
    state.select(Some(menu.cursor));
    let list = List::new(items)
        .block(
            Block::default()
                .title(menu.row.name.as_str())
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().fg(app.theme.primary));
    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}
