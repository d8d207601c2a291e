//! Greenhouse theme and color utilities.

use cropdeck_core::{ContainerStatus, ContainerType};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct GreenhouseTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
    pub physical: Color,
    pub r#virtual: Color,
}

impl GreenhouseTheme {
    pub fn greenhouse() -> Self {
        Self {
            bg: Color::Rgb(12, 20, 14),
            bg_highlight: Color::Rgb(34, 54, 38),
            primary: Color::Rgb(102, 187, 106),
            primary_dim: Color::Rgb(56, 118, 60),
            secondary: Color::Rgb(255, 183, 77),
            success: Color::Rgb(129, 199, 132),
            warning: Color::Rgb(255, 213, 79),
            error: Color::Rgb(239, 83, 80),
            info: Color::Rgb(100, 181, 246),
            text: Color::Rgb(236, 239, 234),
            text_dim: Color::Rgb(144, 156, 146),
            border: Color::Rgb(70, 90, 74),
            border_focus: Color::Rgb(102, 187, 106),
            physical: Color::Rgb(77, 182, 172),
            r#virtual: Color::Rgb(149, 117, 205),
        }
    }

    pub fn border_for(&self, focused: bool) -> Color {
        if focused {
            self.border_focus
        } else {
            self.border
        }
    }
}

pub fn container_status_color(status: ContainerStatus, theme: &GreenhouseTheme) -> Color {
    match status {
        ContainerStatus::Created => theme.info,
        ContainerStatus::Active => theme.success,
        ContainerStatus::Maintenance => theme.warning,
        ContainerStatus::Inactive => theme.text_dim,
    }
}

pub fn container_type_color(container_type: ContainerType, theme: &GreenhouseTheme) -> Color {
    match container_type {
        ContainerType::Physical => theme.physical,
        ContainerType::Virtual => theme.r#virtual,
    }
}

pub fn alert_color(has_alert: bool, theme: &GreenhouseTheme) -> Color {
    if has_alert {
        theme.error
    } else {
        theme.text_dim
    }
}

pub fn utilization_color(percent: f64, theme: &GreenhouseTheme) -> Color {
    if percent < 70.0 {
        theme.success
    } else if percent < 90.0 {
        theme.warning
    } else {
        theme.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_thresholds() {
        let theme = GreenhouseTheme::greenhouse();
        assert_eq!(utilization_color(40.0, &theme), theme.success);
        assert_eq!(utilization_color(75.0, &theme), theme.warning);
        assert_eq!(utilization_color(95.0, &theme), theme.error);
    }
}
