//! Search and filter section.

use crate::nav::{Focus, Screen};
use crate::state::{App, FilterField};
use crate::widgets::{FilterBar, FilterOption};
use ratatui::{layout::Rect, style::Style, Frame};

pub fn options(app: &App) -> Vec<FilterOption> {
    let filters = app.containers.filters();
    let section_focused = app.screen == Screen::Dashboard && app.focus == Focus::Filters;
    FilterField::all()
        .iter()
        .map(|field| {
            let mut value = field.value(filters);
            let focused = section_focused && app.filter_section.field == *field;
            if *field == FilterField::Search && focused && app.filter_section.editing {
                value.push('_');
            }
            let constrained = match field {
                FilterField::Search => !filters.search.is_empty(),
                FilterField::Type => filters.container_type.is_some(),
                FilterField::Tenant => !filters.tenant.is_empty(),
                FilterField::Purpose => filters.purpose.is_some(),
                FilterField::Status => filters.status.is_some(),
                FilterField::HasAlerts => filters.has_alerts,
            };
            FilterOption {
                label: field.label().to_string(),
                value,
                focused,
                constrained,
            }
        })
        .collect()
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let options = options(app);
    let focused = app.focus == Focus::Filters;
    let bar = FilterBar {
        title: "Search & Filter [c clear]",
        filters: &options,
        focused_style: Style::default().fg(app.theme.primary),
        constrained_style: Style::default().fg(app.theme.secondary),
        idle_style: Style::default().fg(app.theme.text_dim),
        border_style: Style::default().fg(app.theme.border_for(focused)),
    };
    bar.render(f, area);
}
