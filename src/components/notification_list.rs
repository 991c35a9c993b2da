// ABOUTME: Notification list component rendering one multi-line row per record, or a placeholder

use chrono::{DateTime, Utc};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{AppState, ListView};
use crate::models::{format_time_ago, Notification, NotificationType};

pub struct NotificationListComponent {
    list_state: ListState,
}

impl Default for NotificationListComponent {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }
}

impl NotificationListComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let rows = state.notifications();
        let block = Block::default()
            .title(format!("Notifications ({})", rows.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title_style(Style::default().fg(Color::Yellow));

        match state.controller.view() {
            ListView::Loading => {
                Self::render_placeholder(frame, area, block, "Loading notifications...", Color::Gray);
            }
            ListView::Failed => {
                Self::render_placeholder(frame, area, block, "Failed to load notifications", Color::Red);
            }
            ListView::Loaded(rows) if rows.is_empty() => {
                Self::render_placeholder(frame, area, block, "No notifications found", Color::DarkGray);
            }
            ListView::Loaded(rows) => {
                let items = Self::build_list_items(rows, Utc::now());
                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().bg(Color::DarkGray))
                    .highlight_symbol("▶ ");

                // Rows are rebuilt on every render; selection is re-applied by index
                self.list_state.select(state.selected_index);
                frame.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
    }

    fn render_placeholder(frame: &mut Frame, area: Rect, block: Block, text: &str, color: Color) {
        let placeholder = Paragraph::new(text.to_string())
            .block(block)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
    }

    pub fn build_list_items(rows: &[Notification], now: DateTime<Utc>) -> Vec<ListItem<'static>> {
        rows.iter().map(|row| ListItem::new(Self::row_lines(row, now))).collect()
    }

    fn row_lines(notification: &Notification, now: DateTime<Utc>) -> Vec<Line<'static>> {
        let unread = notification.status.is_unread();
        let title_style = if unread {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let body_style = if unread {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut header = vec![
            Span::styled(
                format!("{} ", notification.kind.icon()),
                Style::default().fg(type_color(&notification.kind)),
            ),
            Span::styled(notification.title.clone(), title_style),
        ];
        if notification.send_email {
            header.push(Span::styled(" ✉", Style::default().fg(Color::Cyan)));
        }
        let time_ago = notification
            .created_at
            .map(|created_at| format_time_ago(now, created_at))
            .unwrap_or_default();
        if !time_ago.is_empty() {
            header.push(Span::styled(
                format!("  · {time_ago}"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let meta = format!(
            "   {} │ {} │ {}",
            notification.kind.label(),
            notification.priority,
            notification.recipient_type
        );

        vec![
            Line::from(header),
            Line::from(Span::styled(format!("   {}", notification.message), body_style)),
            Line::from(Span::styled(meta, Style::default().fg(Color::Gray))),
        ]
    }
}

fn type_color(kind: &NotificationType) -> Color {
    match kind {
        NotificationType::Info => Color::Blue,
        NotificationType::Warning => Color::Yellow,
        NotificationType::Alert => Color::Red,
        NotificationType::Other(_) => Color::Magenta,
    }
}
