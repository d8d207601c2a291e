//! Centered status message for loading and error states.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct StatusMessage<'a> {
    pub title: &'a str,
    pub message: String,
    /// Optional second line, e.g. a retry hint.
    pub hint: Option<&'a str>,
    pub style: Style,
    pub hint_style: Style,
}

impl<'a> StatusMessage<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(self.message.clone(), self.style))];
        if let Some(hint) = self.hint {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(hint, self.hint_style)));
        }
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
