//! Container detail screen with tabbed sections.

use crate::state::{App, DetailTab};
use crate::theme::container_status_color;
use crate::views::helpers::{or_dash, reading};
use crate::widgets::{DetailPanel, StatusMessage};
use cropdeck_core::{timestamp, Container, StationReadings};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

pub fn overview_fields(container: &Container) -> Vec<(&'static str, String)> {
    let location = match &container.location {
        Some(location) if container.container_type.has_location() => {
            let mut text = location.short();
            if let Some(address) = &location.address {
                text = format!("{} ({})", text, address);
            }
            text
        }
        _ => "Not set".to_string(),
    };
    let seeds = container.seed_type_labels();
    vec![
        ("Tenant", container.tenant.clone()),
        ("Type", container.container_type.label().to_string()),
        ("Purpose", container.purpose.label().to_string()),
        ("Status", container.status.label().to_string()),
        ("Location", location),
        (
            "Seed Types",
            if seeds.is_empty() {
                "-".to_string()
            } else {
                seeds.join(", ")
            },
        ),
        ("Notes", or_dash(container.notes.as_deref())),
        ("Yield", reading(container.metrics.yield_kg, " kg")),
        (
            "Space Utilization",
            reading(container.metrics.space_utilization_percentage, "%"),
        ),
        (
            "Shadow Service",
            on_off(container.settings.shadow_service_enabled),
        ),
        (
            "Ecosystem",
            if container.ecosystem_connected() {
                "Connected".to_string()
            } else {
                "Not connected".to_string()
            },
        ),
        ("Created", timestamp::format_date_time(&container.created)),
        ("Modified", timestamp::format_date_time(&container.modified)),
    ]
}

fn on_off(enabled: bool) -> String {
    if enabled { "On" } else { "Off" }.to_string()
}

pub fn station_fields(station: Option<&StationReadings>) -> Vec<(&'static str, String)> {
    let value = |f: fn(&StationReadings) -> f64, unit: &str| reading(station.map(f), unit);
    vec![
        ("Water Temperature", value(|s| s.water_temperature, "°C")),
        ("EC", value(|s| s.ec, " mS/cm")),
        ("pH", value(|s| s.ph, "")),
        ("Water Hours", value(|s| s.water_hours, " h")),
        ("Light Hours", value(|s| s.light_hours, " h")),
    ]
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(detail) = app.detail.as_ref() else {
        return;
    };
    let Some(container) = detail.query.container() else {
        let (message, hint) = match detail.query.error() {
            Some(error) => (error.to_string(), Some("Press r to retry • Esc back")),
            None => ("Loading container...".to_string(), None),
        };
        StatusMessage {
            title: "Container",
            message,
            hint,
            style: Style::default().fg(app.theme.text),
            hint_style: Style::default().fg(app.theme.text_dim),
        }
        .render(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let mut heading = vec![
        Span::styled(
            container.name.clone(),
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            container.status.label(),
            Style::default().fg(container_status_color(container.status, &app.theme)),
        ),
    ];
    if container.has_alert {
        heading.push(Span::styled("  ALERT", Style::default().fg(app.theme.error)));
    }
    if let Some(error) = detail.query.error() {
        heading.push(Span::styled(
            format!("  (refresh failed: {})", error),
            Style::default().fg(app.theme.warning),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(heading)).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let titles: Vec<&str> = DetailTab::all().iter().map(DetailTab::title).collect();
    let tabs = Tabs::new(titles)
        .select(detail.tab.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary));
    f.render_widget(tabs, chunks[1]);

    let label_style = Style::default().fg(app.theme.secondary);
    match detail.tab {
        DetailTab::Overview => {
            DetailPanel::new("Overview", overview_fields(container))
                .label_style(label_style)
                .render(f, chunks[2]);
        }
        DetailTab::Environment => render_environment(f, container, label_style, chunks[2]),
        DetailTab::Inventory => render_inventory(f, app, container, chunks[2]),
        DetailTab::Devices => render_devices(f, app, container, chunks[2]),
    }
}

fn render_environment(f: &mut Frame<'_>, container: &Container, label_style: Style, area: Rect) {
    let env = &container.environment;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    DetailPanel::new(
        "Air",
        vec![
            ("Temperature", reading(env.air_temperature, "°C")),
            ("Humidity", reading(env.humidity, "%")),
            ("CO2", reading(env.co2, " ppm")),
        ],
    )
    .label_style(label_style)
    .render(f, columns[0]);
    DetailPanel::new("Nursery Station", station_fields(env.nursery_station.as_ref()))
        .label_style(label_style)
        .render(f, columns[1]);
    DetailPanel::new("Cultivation Area", station_fields(env.cultivation_area.as_ref()))
        .label_style(label_style)
        .render(f, columns[2]);
}

fn id_list<'a>(title: &'a str, ids: &'a [String], empty: &'a str) -> List<'a> {
    let items: Vec<ListItem> = if ids.is_empty() {
        vec![ListItem::new(empty)]
    } else {
        ids.iter().map(|id| ListItem::new(id.as_str())).collect()
    };
    List::new(items).block(Block::default().title(title).borders(Borders::ALL))
}

fn render_inventory(f: &mut Frame<'_>, app: &App, container: &Container, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let inventory = &container.inventory;
    let style = Style::default().fg(app.theme.text);
    f.render_widget(
        id_list("Trays", &inventory.tray_ids, "No trays").style(style),
        columns[0],
    );
    f.render_widget(
        id_list("Panels", &inventory.panel_ids, "No panels").style(style),
        columns[1],
    );
}

fn render_devices(f: &mut Frame<'_>, app: &App, container: &Container, area: Rect) {
    let panels = &container.inventory.panel_ids;
    let items: Vec<ListItem> = if panels.is_empty() {
        vec![ListItem::new("No devices registered")]
    } else {
        panels
            .iter()
            .map(|id| {
                ListItem::new(Line::from(vec![
                    Span::styled("● ", Style::default().fg(app.theme.success)),
                    Span::raw(format!("{}  connected", id)),
                ]))
            })
            .collect()
    };
    f.render_widget(
        List::new(items).block(Block::default().title("Devices").borders(Borders::ALL)),
        area,
    );
}
