// ABOUTME: Help overlay component displaying keyboard shortcuts and commands

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem},
    style::{Color, Modifier, Style},
};

use super::centered_rect;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let section = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let help_items = vec![
            ListItem::new("Navigation:").style(section),
            ListItem::new("  j/↓        Move down"),
            ListItem::new("  k/↑        Move up"),
            ListItem::new("  g          Go to top"),
            ListItem::new("  G          Go to bottom"),
            ListItem::new(""),
            ListItem::new("Notification Actions:").style(section),
            ListItem::new("  n          Send notification"),
            ListItem::new("  m          Mark selected as read"),
            ListItem::new("  d          Delete selected"),
            ListItem::new("  M          Mark all as read"),
            ListItem::new("  C          Clear all notifications"),
            ListItem::new("  r          Refresh notifications"),
            ListItem::new(""),
            ListItem::new("Filters:").style(section),
            ListItem::new("  s          Cycle status filter"),
            ListItem::new("  t          Cycle type filter"),
            ListItem::new(""),
            ListItem::new("General:").style(section),
            ListItem::new("  ?          Toggle this help"),
            ListItem::new("  q/Esc      Quit application"),
            ListItem::new("  Ctrl+C     Force quit"),
        ];

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Help - Press ? or Esc to close")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
