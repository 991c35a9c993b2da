// ABOUTME: Main layout component: header with filters and clock, notification list, bottom menu bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Style},
};

use crate::app::{state::View, AppState};
use crate::config::PanelElements;
use super::{
    ComposeComponent, ConfirmationDialogComponent, HelpComponent, NotificationListComponent,
    ToastComponent,
};

pub struct LayoutComponent {
    notification_list: NotificationListComponent,
    compose: ComposeComponent,
    confirmation_dialog: ConfirmationDialogComponent,
    help: HelpComponent,
    toasts: ToastComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            notification_list: NotificationListComponent::new(),
            compose: ComposeComponent::new(),
            confirmation_dialog: ConfirmationDialogComponent::new(),
            help: HelpComponent::new(),
            toasts: ToastComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Notification list
                Constraint::Length(3), // Bottom menu bar
            ])
            .split(frame.size());

        self.render_header(frame, main_chunks[0], state);
        self.notification_list.render(frame, main_chunks[1], state);
        self.render_menu_bar(frame, main_chunks[2], &state.elements);

        if state.current_view == View::Compose {
            self.compose.render(frame, frame.size(), state);
        }

        if state.help_visible {
            self.help.render(frame, frame.size());
        }

        // Confirmation dialog sits above other overlays; toasts above everything
        if state.confirmation_dialog.is_some() {
            self.confirmation_dialog.render(frame, frame.size(), state);
        }

        self.toasts.render(frame, frame.size(), state);
    }

    /// Area of the modal a backdrop click should dismiss. Only the compose
    /// modal qualifies, and not while a confirmation is pending on top of it.
    pub fn dismissable_modal_area(area: Rect, state: &AppState) -> Option<Rect> {
        (state.current_view == View::Compose && state.confirmation_dialog.is_none())
            .then(|| ComposeComponent::area(area))
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let filter = state.controller.filter();
        let mut filters = Vec::new();
        if state.elements.status_filter {
            filters.push(format!("Status: {}", filter.status_label()));
        }
        if state.elements.type_filter {
            filters.push(format!("Type: {}", filter.kind_label()));
        }

        let filters = Paragraph::new(filters.join("  │  "))
            .block(
                Block::default()
                    .title("Notify Panel")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::White));
        frame.render_widget(filters, chunks[0]);

        let clock_text = if state.elements.clock {
            state.clock.text().to_string()
        } else {
            String::new()
        };
        let clock = Paragraph::new(clock_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Right);
        frame.render_widget(clock, chunks[1]);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect, elements: &PanelElements) {
        let menu = Paragraph::new(menu_text(elements))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

/// Menu entries for the bound controls only.
pub fn menu_text(elements: &PanelElements) -> String {
    let entries = [
        ("[n]ew", elements.send_notification),
        ("[m]ark read", true),
        ("[d]elete", true),
        ("[M]ark all", elements.mark_all_read),
        ("[C]lear all", elements.clear_all),
        ("[s]tatus", elements.status_filter),
        ("[t]ype", elements.type_filter),
        ("[r]efresh", true),
        ("[?]help", true),
        ("[q]uit", true),
    ];
    entries
        .iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(label, _)| *label)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
