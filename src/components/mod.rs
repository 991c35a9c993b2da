// ABOUTME: UI components for the TUI interface including notification list, compose modal, dialogs and toasts

pub mod compose;
pub mod confirmation_dialog;
pub mod help;
pub mod layout;
pub mod notification_list;
pub mod toast;

pub use compose::ComposeComponent;
pub use confirmation_dialog::ConfirmationDialogComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use notification_list::NotificationListComponent;
pub use toast::ToastComponent;

use ratatui::prelude::*;

/// Rect of `percent_x` by `percent_y` centered inside `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
