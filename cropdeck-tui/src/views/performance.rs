//! Performance overview: one metric card per container type.

use crate::nav::Focus;
use crate::state::App;
use crate::theme::{container_type_color, utilization_color};
use crate::widgets::{MetricCard, StatusMessage, UtilizationGauge};
use cropdeck_core::{ContainerType, TimeRange, TypeMetrics, WEEKDAY_LABELS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn card_title(container_type: ContainerType, metrics: &TypeMetrics, selected: bool) -> String {
    let marker = if selected { "[x]" } else { "[ ]" };
    format!("{} {} ({})", marker, container_type.label(), metrics.count)
}

pub fn card_stats(metrics: &TypeMetrics) -> Vec<(&'static str, String)> {
    vec![
        ("Avg Yield", format!("{:.1} kg", metrics.avg_yield)),
        ("Total Yield", format!("{:.1} kg", metrics.total_yield)),
        ("Avg Utilization", format!("{:.1}%", metrics.avg_utilization)),
    ]
}

fn time_range_line(app: &App) -> Line<'static> {
    let current = app.metrics.time_range();
    let mut spans = vec![Span::raw("Time range [t]: ")];
    for range in TimeRange::all() {
        let style = if *range == current {
            Style::default().fg(app.theme.primary)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        spans.push(Span::styled(format!(" {} ", range.label()), style));
    }
    Line::from(spans)
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Performance;
    let block = Block::default()
        .title("Performance Overview")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_for(focused)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    f.render_widget(Paragraph::new(time_range_line(app)), rows[0]);

    let Some(metrics) = app.metrics.metrics() else {
        let (message, hint) = match app.metrics.error() {
            Some(error) => (error.to_string(), Some("Press r to retry")),
            None => ("Loading metrics...".to_string(), None),
        };
        StatusMessage {
            title: "Metrics",
            message,
            hint,
            style: Style::default().fg(app.theme.text),
            hint_style: Style::default().fg(app.theme.text_dim),
        }
        .render(f, rows[1]);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let selected = app.metrics.type_filter();
    for (container_type, column) in ContainerType::all().iter().zip(columns.iter()) {
        let type_metrics = metrics.for_type(*container_type);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(*column);

        let under_cursor = focused && app.performance.cursor == *container_type;
        let color = container_type_color(*container_type, &app.theme);
        let card = MetricCard {
            title: card_title(*container_type, type_metrics, selected == Some(*container_type)),
            stats: card_stats(type_metrics),
            chart_title: "Yield (kg)",
            series: &type_metrics.yield_data,
            labels: &WEEKDAY_LABELS,
            bar_style: Style::default().fg(color),
            border_style: Style::default().fg(if under_cursor {
                app.theme.border_focus
            } else {
                app.theme.border
            }),
        };
        card.render(f, parts[0]);

        UtilizationGauge {
            title: "Space Utilization".to_string(),
            percent: type_metrics.avg_utilization,
            style: Style::default().fg(utilization_color(type_metrics.avg_utilization, &app.theme)),
        }
        .render(f, parts[1]);
    }
}
