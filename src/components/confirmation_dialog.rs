// ABOUTME: Yes/No confirmation dialog shown before destructive or bulk actions

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use crate::app::AppState;

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(dialog) = state.confirmation_dialog.as_ref() else {
            return;
        };

        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let selected = Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let unselected = Style::default().fg(Color::White);
        let (yes_style, no_style) = if dialog.selected_option {
            (selected, unselected)
        } else {
            (unselected, selected)
        };

        let text = vec![
            Line::from(dialog.message.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled("[ Yes ]", yes_style),
                Span::raw("    "),
                Span::styled("[ No ]", no_style),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "←/→: Choose • Enter: Confirm • Esc: Cancel",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title(dialog.title.clone())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .style(Style::default().bg(Color::Black)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
    }
}

impl Default for ConfirmationDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
