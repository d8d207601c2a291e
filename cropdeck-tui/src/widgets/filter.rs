//! Filter bar widget.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
    /// Field under the cursor.
    pub focused: bool,
    /// Field narrows the result set.
    pub constrained: bool,
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    pub focused_style: Style,
    pub constrained_style: Style,
    pub idle_style: Style,
    pub border_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for filter in self.filters {
            let mut style = if filter.constrained {
                self.constrained_style
            } else {
                self.idle_style
            };
            if filter.focused {
                style = style
                    .patch(self.focused_style)
                    .add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(
                format!(" {}: {} ", filter.label, filter.value),
                style,
            ));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
