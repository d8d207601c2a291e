//! Gauge widget for space utilization.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

pub struct UtilizationGauge {
    pub title: String,
    /// Percentage, 0..=100.
    pub percent: f64,
    pub style: Style,
}

impl UtilizationGauge {
    pub fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let gauge = Gauge::default()
            .block(Block::default().title(self.title.as_str()).borders(Borders::ALL))
            .gauge_style(self.style)
            .label(format!("{:.1}%", self.percent))
            .ratio(self.ratio());
        f.render_widget(gauge, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_is_clamped() {
        let gauge = UtilizationGauge {
            title: String::new(),
            percent: 140.0,
            style: Style::default(),
        };
        assert_eq!(gauge.ratio(), 1.0);
        let gauge = UtilizationGauge {
            percent: -3.0,
            ..gauge
        };
        assert_eq!(gauge.ratio(), 0.0);
    }
}
