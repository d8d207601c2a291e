//! View rendering dispatch.

pub mod detail;
pub mod filters;
pub mod form;
pub mod helpers;
pub mod list;
pub mod performance;

use crate::nav::{Focus, Screen};
use crate::notifications::NotificationLevel;
use crate::state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.screen {
        Screen::Dashboard => render_dashboard(f, app, layout[1]),
        Screen::Detail => detail::render(f, app, layout[1]),
    }

    if app.form.is_some() {
        form::render(f, app, layout[1]);
    }

    render_footer(f, app, layout[2]);
}

fn render_dashboard(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(area);

    filters::render(f, app, chunks[0]);
    performance::render(f, app, chunks[1]);
    list::render(f, app, chunks[2]);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let section = match app.screen {
        Screen::Dashboard => app.focus.title(),
        Screen::Detail => "Container",
    };
    let title = format!(
        "CROPDECK | {} | {} containers | API: {}",
        section,
        app.containers.total(),
        app.config.api_base_url
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn help_text(app: &App) -> &'static str {
    if let Some(form) = &app.form {
        return if form.focus().is_text() {
            "type to edit • Tab/↑↓ field • Enter next • Ctrl-s submit • Esc close"
        } else {
            "Tab/↑↓ field • ←/→ change • Space toggle • Enter select • Ctrl-s submit • Esc close"
        };
    }
    match app.screen {
        Screen::Detail => "Tab/←→ tabs • e edit • r refresh • Esc back • q quit",
        Screen::Dashboard => match app.focus {
            Focus::Filters if app.filter_section.editing => "type to search • Enter/Esc done",
            Focus::Filters => "↑↓ field • ←/→ change • / search • c clear • Tab section • q quit",
            Focus::Performance => "←/→ type • Space select • t time range • Tab section • q quit",
            Focus::List if app.list.menu.is_some() => "↑↓ action • Enter run • Esc close",
            Focus::List => {
                "↑↓ row • Enter detail • m menu • e edit • n new • [ ] page • + rows • r refresh • q quit"
            }
        },
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = if let Some(note) = app.current_notification() {
        let color = match note.level {
            NotificationLevel::Info => app.theme.info,
            NotificationLevel::Warning => app.theme.warning,
            NotificationLevel::Error => app.theme.error,
            NotificationLevel::Success => app.theme.success,
        };
        (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(color),
        )
    } else {
        (help_text(app).to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
