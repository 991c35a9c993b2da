// ABOUTME: Event handling system for keyboard input and panel actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::form::FormField;
use crate::app::state::{AppState, AsyncAction, ConfirmAction, View, MARK_ALL_READ_DELAY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    NextNotification,
    PreviousNotification,
    GoToTop,
    GoToBottom,
    Refresh,
    OpenCompose,
    DeleteSelected,
    MarkSelectedRead,
    MarkAllRead,
    ClearAll,
    CycleStatusFilter,
    CycleTypeFilter,
    // Compose modal events
    ComposeNextField,
    ComposePreviousField,
    ComposeInputChar(char),
    ComposeBackspace,
    ComposeCycleNext,
    ComposeCyclePrevious,
    ComposeToggleEmail,
    ComposeSubmit,
    CloseModals,
    // Confirmation dialog events
    ConfirmationToggle,  // Switch between Yes/No
    ConfirmationConfirm, // Confirm action
    ConfirmationCancel,  // Cancel dialog
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        // Handle confirmation dialog first (highest priority)
        if state.confirmation_dialog.is_some() {
            return match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => Some(AppEvent::ConfirmationToggle),
                KeyCode::Enter => Some(AppEvent::ConfirmationConfirm),
                KeyCode::Esc => Some(AppEvent::ConfirmationCancel),
                _ => None,
            };
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        // Compose modal swallows printable keys, so it goes before global shortcuts
        if state.current_view == View::Compose {
            return Self::handle_compose_keys(key_event, state);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        let elements = state.elements;
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::NextNotification),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::PreviousNotification),
            KeyCode::Char('g') => Some(AppEvent::GoToTop),
            KeyCode::Char('G') => Some(AppEvent::GoToBottom),
            KeyCode::Char('r') => Some(AppEvent::Refresh),
            KeyCode::Char('n') if elements.send_notification => Some(AppEvent::OpenCompose),
            KeyCode::Char('d') => Some(AppEvent::DeleteSelected),
            KeyCode::Char('m') => Some(AppEvent::MarkSelectedRead),
            KeyCode::Char('M') if elements.mark_all_read => Some(AppEvent::MarkAllRead),
            KeyCode::Char('C') if elements.clear_all => Some(AppEvent::ClearAll),
            KeyCode::Char('s') if elements.status_filter => Some(AppEvent::CycleStatusFilter),
            KeyCode::Char('t') if elements.type_filter => Some(AppEvent::CycleTypeFilter),
            _ => None,
        }
    }

    /// A left click outside the open compose modal closes it. `modal` is the
    /// modal's on-screen area, `None` when no dismissable modal is showing.
    pub fn handle_mouse_event(mouse: MouseEvent, modal: Option<Rect>) -> Option<AppEvent> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let modal = modal?;
        let inside = (modal.left()..modal.right()).contains(&mouse.column)
            && (modal.top()..modal.bottom()).contains(&mouse.row);
        if inside {
            None
        } else {
            Some(AppEvent::CloseModals)
        }
    }

    fn handle_compose_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let form = state.compose_form.as_ref()?;
        let focus = form.focus;

        match key_event.code {
            KeyCode::Esc => Some(AppEvent::CloseModals),
            KeyCode::Tab => Some(AppEvent::ComposeNextField),
            KeyCode::BackTab => Some(AppEvent::ComposePreviousField),
            KeyCode::Enter if state.elements.compose_form => Some(AppEvent::ComposeSubmit),
            KeyCode::Backspace if focus.is_text() => Some(AppEvent::ComposeBackspace),
            KeyCode::Right | KeyCode::Left if focus.is_selector() => {
                if focus == FormField::RecipientType && !state.elements.recipient_type {
                    return None;
                }
                if key_event.code == KeyCode::Right {
                    Some(AppEvent::ComposeCycleNext)
                } else {
                    Some(AppEvent::ComposeCyclePrevious)
                }
            }
            KeyCode::Char(' ') if focus == FormField::SendEmail => {
                Some(AppEvent::ComposeToggleEmail)
            }
            KeyCode::Char(ch) if focus.is_text() => Some(AppEvent::ComposeInputChar(ch)),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::NextNotification => state.next_notification(),
            AppEvent::PreviousNotification => state.previous_notification(),
            AppEvent::GoToTop => state.go_to_top(),
            AppEvent::GoToBottom => state.go_to_bottom(),
            AppEvent::Refresh => {
                state.pending_async_action = Some(AsyncAction::Reload);
            }
            AppEvent::OpenCompose => state.open_compose(),
            AppEvent::DeleteSelected => {
                if let Some(notification) = state.selected_notification() {
                    let id = notification.id.clone();
                    state.show_confirmation(ConfirmAction::DeleteNotification(id));
                }
            }
            AppEvent::MarkSelectedRead => {
                if let Some(notification) = state.selected_notification() {
                    let id = notification.id.clone();
                    state.pending_async_action = Some(AsyncAction::MarkRead(id));
                }
            }
            AppEvent::MarkAllRead => state.show_confirmation(ConfirmAction::MarkAllRead),
            AppEvent::ClearAll => state.show_confirmation(ConfirmAction::ClearAll),
            AppEvent::CycleStatusFilter => state.cycle_status_filter(),
            AppEvent::CycleTypeFilter => state.cycle_type_filter(),
            AppEvent::ComposeNextField => {
                if let Some(ref mut form) = state.compose_form {
                    form.next_field();
                }
            }
            AppEvent::ComposePreviousField => {
                if let Some(ref mut form) = state.compose_form {
                    form.previous_field();
                }
            }
            AppEvent::ComposeInputChar(ch) => {
                if let Some(ref mut form) = state.compose_form {
                    form.input_char(ch);
                }
            }
            AppEvent::ComposeBackspace => {
                if let Some(ref mut form) = state.compose_form {
                    form.backspace();
                }
            }
            AppEvent::ComposeCycleNext => {
                if let Some(ref mut form) = state.compose_form {
                    form.cycle(true);
                }
            }
            AppEvent::ComposeCyclePrevious => {
                if let Some(ref mut form) = state.compose_form {
                    form.cycle(false);
                }
            }
            AppEvent::ComposeToggleEmail => {
                if let Some(ref mut form) = state.compose_form {
                    form.toggle_send_email();
                }
            }
            AppEvent::ComposeSubmit => {
                state.pending_async_action = Some(AsyncAction::CreateNotification);
            }
            AppEvent::CloseModals => state.close_modals(),
            AppEvent::ConfirmationToggle => {
                if let Some(ref mut dialog) = state.confirmation_dialog {
                    dialog.selected_option = !dialog.selected_option;
                }
            }
            AppEvent::ConfirmationConfirm => {
                if let Some(dialog) = state.confirmation_dialog.take() {
                    if dialog.selected_option {
                        match dialog.confirm_action {
                            ConfirmAction::DeleteNotification(id) => {
                                state.pending_async_action = Some(AsyncAction::DeleteNotification(id));
                            }
                            ConfirmAction::ClearAll => {
                                state.pending_async_action = Some(AsyncAction::ClearAll);
                            }
                            ConfirmAction::MarkAllRead => {
                                state.schedule(MARK_ALL_READ_DELAY, AsyncAction::MarkAllRead);
                            }
                        }
                    }
                    // If not confirmed, just close the dialog
                }
            }
            AppEvent::ConfirmationCancel => {
                state.confirmation_dialog = None;
            }
        }
    }
}
