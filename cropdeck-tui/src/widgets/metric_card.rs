//! Metric card: headline numbers above a 7-point bar chart.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

pub struct MetricCard<'a> {
    pub title: String,
    /// Label/value pairs shown above the chart.
    pub stats: Vec<(&'a str, String)>,
    pub chart_title: &'a str,
    /// One value per label.
    pub series: &'a [f64],
    pub labels: &'a [&'a str],
    pub bar_style: Style,
    pub border_style: Style,
}

/// Bars need integers; keep one decimal of resolution.
pub fn scaled_bars<'a>(labels: &[&'a str], series: &[f64]) -> Vec<(&'a str, u64)> {
    labels
        .iter()
        .zip(series.iter())
        .map(|(label, value)| (*label, (value.max(0.0) * 10.0).round() as u64))
        .collect()
}

impl<'a> MetricCard<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(self.border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.stats.len() as u16),
                Constraint::Min(0),
            ])
            .split(inner);

        let lines: Vec<Line> = self
            .stats
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::raw(format!("{}: ", label)),
                    Span::styled(value.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), chunks[0]);

        let bars = scaled_bars(self.labels, self.series);
        let chart = BarChart::default()
            .block(Block::default().title(self.chart_title))
            .data(bars.as_slice())
            .bar_width(3)
            .bar_gap(1)
            .bar_style(self.bar_style)
            .value_style(self.bar_style.add_modifier(Modifier::REVERSED));
        f.render_widget(chart, chunks[1]);
    }
}
