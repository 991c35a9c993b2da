// ABOUTME: Toast overlay pinned to the top-right corner; live toasts stack downwards, newest first

use ratatui::{
    prelude::*,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{AppState, ToastKind};

const TOAST_WIDTH: u16 = 50;
const TOAST_HEIGHT: u16 = 3;

pub struct ToastComponent;

impl ToastComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let mut y = area.y + 1;

        for toast in state.controller.toasts().iter().rev() {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }

            let color = match toast.kind {
                ToastKind::Success => Color::Green,
                ToastKind::Error => Color::Red,
            };
            let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);

            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(toast.message.clone())
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(color)),
                    )
                    .style(Style::default().fg(color)),
                toast_area,
            );

            y += TOAST_HEIGHT;
        }
    }
}

impl Default for ToastComponent {
    fn default() -> Self {
        Self::new()
    }
}
