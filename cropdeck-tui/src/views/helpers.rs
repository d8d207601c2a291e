//! Common layout and formatting helpers for views.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rectangle of the given size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Right-hand side panel taking `percent` of the width.
pub fn side_panel(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - percent),
            Constraint::Percentage(percent),
        ])
        .split(area)[1]
}

/// Small popup anchored under `row` of `area`, clipped to it.
pub fn anchored_popup(area: Rect, row: u16, width: u16, height: u16) -> Rect {
    let y = (area.y + row + 1).min(area.bottom().saturating_sub(height));
    let x = area.right().saturating_sub(width + 2).max(area.x);
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, unit),
        None => "N/A".to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_formats() {
        assert_eq!(reading(Some(21.04), "°C"), "21.0°C");
        assert_eq!(reading(None, "%"), "N/A");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("note")), "note");
    }

    #[test]
    fn test_popup_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = anchored_popup(area, 9, 14, 5);
        assert!(popup.bottom() <= area.bottom());
        assert!(popup.right() <= area.right());
    }
}
