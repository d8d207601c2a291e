//! Create/edit side panel.

use crate::forms::{seed_catalog, CreateForm, EditForm, FormField, FormPanel};
use crate::state::App;
use crate::views::helpers::side_panel;
use cropdeck_core::SeedType;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// One rendered row of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub field: FormField,
    pub label: &'static str,
    pub value: String,
}

fn yes_no(value: bool) -> String {
    if value { "[x]" } else { "[ ]" }.to_string()
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn seed_summary(selected: &[SeedType]) -> String {
    if selected.is_empty() {
        "none".to_string()
    } else {
        selected
            .iter()
            .map(SeedType::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn create_rows(form: &CreateForm) -> Vec<FieldRow> {
    form.visible_fields()
        .into_iter()
        .map(|field| {
            let value = match field {
                FormField::Name => or_placeholder(&form.data.name, "<required>"),
                FormField::Tenant => or_placeholder(&form.data.tenant, "<select>"),
                FormField::Type => form.data.container_type.label().to_string(),
                FormField::Purpose => form.data.purpose.label().to_string(),
                FormField::SeedTypes => seed_summary(&form.data.seed_types),
                FormField::ShadowService => yes_no(form.data.settings.shadow_service_enabled),
                FormField::RoboticsSimulation => yes_no(
                    form.data.settings.robotics_simulation_enabled.unwrap_or(false),
                ),
                FormField::ConnectEcosystem => yes_no(form.connect_ecosystem),
                FormField::Submit => form.submit_label().to_string(),
                other => form.text_value(other),
            };
            FieldRow {
                field,
                label: field.label(),
                value,
            }
        })
        .collect()
}

pub fn edit_rows(form: &EditForm) -> Vec<FieldRow> {
    let mut rows = vec![
        FieldRow {
            field: FormField::Name,
            label: FormField::Name.label(),
            value: form.name.clone(),
        },
        FieldRow {
            field: FormField::Type,
            label: FormField::Type.label(),
            value: form.container_type.label().to_string(),
        },
    ];
    let settings = form.data.settings.clone().unwrap_or_default();
    rows.extend(form.visible_fields().into_iter().map(|field| {
        let value = match field {
            FormField::Tenant => or_placeholder(form.data.tenant.as_deref().unwrap_or(""), "<select>"),
            FormField::Status => form.data.status.unwrap_or_default().label().to_string(),
            FormField::Purpose => form.data.purpose.unwrap_or_default().label().to_string(),
            FormField::SeedTypes => seed_summary(form.data.seed_types.as_deref().unwrap_or(&[])),
            FormField::ShadowService => yes_no(settings.shadow_service_enabled),
            FormField::RoboticsSimulation => {
                yes_no(settings.robotics_simulation_enabled.unwrap_or(false))
            }
            FormField::ConnectEcosystem if form.connect_locked => "[x] (connected)".to_string(),
            FormField::ConnectEcosystem => yes_no(form.connect_ecosystem),
            FormField::Submit => form.submit_label().to_string(),
            other => form.text_value(other),
        };
        FieldRow {
            field,
            label: field.label(),
            value,
        }
    }));
    rows
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(panel) = app.form.as_ref() else {
        return;
    };
    let (title, rows, error, seeds, seed_cursor, can_submit) = match panel {
        FormPanel::Create(form) => (
            "Create Container",
            create_rows(form),
            form.error.clone(),
            form.data.seed_types.clone(),
            form.seed_cursor,
            form.can_submit(),
        ),
        FormPanel::Edit(form) => (
            "Edit Container",
            edit_rows(form),
            form.error.clone(),
            form.data.seed_types.clone().unwrap_or_default(),
            form.seed_cursor,
            form.can_submit(),
        ),
    };
    let focus = panel.focus();

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error,
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    for row in rows {
        let focused = row.field == focus;
        if row.field == FormField::Submit {
            lines.push(Line::from(""));
            let mut style = if can_submit {
                Style::default().fg(app.theme.primary)
            } else {
                Style::default().fg(app.theme.text_dim)
            };
            if focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(format!("[ {} ]", row.value), style)));
            continue;
        }

        let label_style = if focused {
            Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.secondary)
        };
        let mut value = row.value;
        if focused && row.field.is_text() {
            value.push('_');
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", row.label), label_style),
            Span::raw(value),
        ]));

        if focused && row.field == FormField::SeedTypes {
            for (idx, seed) in seed_catalog().iter().enumerate() {
                let chosen = seeds.iter().any(|s| s.id == seed.id);
                let marker = if chosen { "[x]" } else { "[ ]" };
                let style = if idx == seed_cursor {
                    Style::default().fg(app.theme.primary)
                } else {
                    Style::default().fg(app.theme.text_dim)
                };
                lines.push(Line::from(Span::styled(
                    format!("    {} {}", marker, seed.label()),
                    style,
                )));
            }
        }
    }

    let panel_area = side_panel(area, 45);
    f.render_widget(Clear, panel_area);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(widget, panel_area);
}
