// ABOUTME: Compose modal for sending a new notification, one bordered box per form field

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    style::{Color, Modifier, Style},
};

use super::centered_rect;
use crate::app::{AppState, FormField, NotificationForm};

pub struct ComposeComponent;

impl ComposeComponent {
    pub fn new() -> Self {
        Self
    }

    /// Screen area of the modal within `area`.
    pub fn area(area: Rect) -> Rect {
        centered_rect(70, 90, area)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(form) = state.compose_form.as_ref() else {
            return;
        };

        let popup_area = Self::area(area);
        frame.render_widget(Clear, popup_area);

        let fields = form.visible_fields();
        let mut constraints = vec![Constraint::Length(3)]; // Title bar
        for field in &fields {
            constraints.push(if *field == FormField::Message {
                Constraint::Length(5)
            } else {
                Constraint::Length(3)
            });
        }
        constraints.push(Constraint::Min(3)); // Instructions

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(popup_area);

        let title = Paragraph::new("Send Notification")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title("New Notification"),
            )
            .style(Style::default().fg(Color::Yellow).bg(Color::Black))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        for (idx, field) in fields.iter().enumerate() {
            self.render_field(frame, chunks[idx + 1], form, *field);
        }

        let instructions = Paragraph::new(
            "Tab/Shift+Tab: Field • ←/→: Change • Space: Toggle • Enter: Send • Esc: Cancel",
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .style(Style::default().fg(Color::Gray).bg(Color::Black))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(instructions, chunks[fields.len() + 1]);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, form: &NotificationForm, field: FormField) {
        let focused = form.focus == field;
        let cursor = if focused { "_" } else { "" };

        let value = match field {
            FormField::Title => format!("{}{}", form.title, cursor),
            FormField::Message => format!("{}{}", form.message, cursor),
            FormField::CustomRecipients => format!("{}{}", form.custom_recipients, cursor),
            FormField::Type => format!("◀ {} ▶", form.kind.label()),
            FormField::Priority => format!("◀ {} ▶", form.priority),
            FormField::RecipientType => format!("◀ {} ▶", form.recipient_type),
            FormField::SendEmail => {
                let mark = if form.send_email { "x" } else { " " };
                format!("[{mark}] Send email copy")
            }
        };

        let border_style = if focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let widget = Paragraph::new(value)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(field.label())
                    .style(Style::default().bg(Color::Black)),
            )
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, area);
    }
}

impl Default for ComposeComponent {
    fn default() -> Self {
        Self::new()
    }
}
