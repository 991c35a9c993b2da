// ABOUTME: Application state for the notification panel: selection, modals, confirmations and deferred actions

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::api::NotificationApi;
use crate::app::clock::Clock;
use crate::app::controller::{Applied, NotificationPanelController};
use crate::app::form::NotificationForm;
use crate::config::{PanelConfig, PanelElements};
use crate::models::{Notification, NotificationFilter};

/// Pause between confirming "mark all read" and acting on it.
pub const MARK_ALL_READ_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    NotificationList,
    Compose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteNotification(String),
    MarkAllRead,
    ClearAll,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::DeleteNotification(_) => "Are you sure you want to delete this notification?",
            Self::MarkAllRead => "Are you sure you want to mark all notifications as read?",
            Self::ClearAll => {
                "Are you sure you want to clear all notifications? This action cannot be undone."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_action: ConfirmAction,
    pub selected_option: bool, // true = Yes, false = No
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    Reload,
    ChangeFilter(NotificationFilter),
    CreateNotification,
    DeleteNotification(String),
    MarkRead(String),
    MarkAllRead,
    ClearAll,
}

#[derive(Debug)]
pub struct AppState {
    pub controller: NotificationPanelController,
    pub current_view: View,
    pub compose_form: Option<NotificationForm>,
    pub confirmation_dialog: Option<ConfirmationDialog>,
    pub selected_index: Option<usize>,
    pub help_visible: bool,
    pub should_quit: bool,
    pub pending_async_action: Option<AsyncAction>,
    /// Actions waiting for their due time, e.g. the mark-all-read delay.
    pub scheduled_actions: Vec<(Instant, AsyncAction)>,
    pub clock: Clock,
    pub elements: PanelElements,
}

impl AppState {
    pub fn new(api: Arc<dyn NotificationApi>, config: &PanelConfig) -> Self {
        Self {
            controller: NotificationPanelController::new(api),
            current_view: View::NotificationList,
            compose_form: None,
            confirmation_dialog: None,
            selected_index: None,
            help_visible: false,
            should_quit: false,
            pending_async_action: None,
            scheduled_actions: Vec::new(),
            clock: Clock::from_offset_minutes(config.clock.utc_offset_minutes),
            elements: config.ui.elements,
        }
    }

    /// Logs which optional surfaces are wired up. Missing ones are skipped,
    /// never fatal.
    pub fn bind_listeners(&self) -> usize {
        let mut bound = 0;
        for (name, present) in self.elements.entries() {
            if present {
                debug!("Bound {}", name);
                bound += 1;
            } else {
                warn!("{} not present, skipping binding", name);
            }
        }
        info!("Bound {} panel controls", bound);
        bound
    }

    pub fn notifications(&self) -> &[Notification] {
        self.controller.visible()
    }

    pub fn selected_notification(&self) -> Option<&Notification> {
        self.notifications().get(self.selected_index?)
    }

    /// Keeps the selection on a valid row after the list is re-rendered.
    pub fn clamp_selection(&mut self) {
        let len = self.notifications().len();
        self.selected_index = if len == 0 {
            None
        } else {
            Some(self.selected_index.unwrap_or(0).min(len - 1))
        };
    }

    pub fn next_notification(&mut self) {
        let len = self.notifications().len();
        if len > 0 {
            let current = self.selected_index.unwrap_or(0);
            self.selected_index = Some((current + 1) % len);
        }
    }

    pub fn previous_notification(&mut self) {
        let len = self.notifications().len();
        if len > 0 {
            let current = self.selected_index.unwrap_or(0);
            self.selected_index = Some(if current == 0 { len - 1 } else { current - 1 });
        }
    }

    pub fn go_to_top(&mut self) {
        if !self.notifications().is_empty() {
            self.selected_index = Some(0);
        }
    }

    pub fn go_to_bottom(&mut self) {
        let len = self.notifications().len();
        if len > 0 {
            self.selected_index = Some(len - 1);
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Opens the compose modal with a freshly reset form.
    pub fn open_compose(&mut self) {
        info!("Opening notification modal");
        self.compose_form = Some(NotificationForm::new());
        self.current_view = View::Compose;
    }

    pub fn close_modals(&mut self) {
        debug!("Closing modals");
        self.compose_form = None;
        self.confirmation_dialog = None;
        self.current_view = View::NotificationList;
    }

    pub fn show_confirmation(&mut self, action: ConfirmAction) {
        let title = match action {
            ConfirmAction::DeleteNotification(_) => "Delete Notification",
            ConfirmAction::MarkAllRead => "Mark All Read",
            ConfirmAction::ClearAll => "Clear All Notifications",
        };
        self.confirmation_dialog = Some(ConfirmationDialog {
            title: title.to_string(),
            message: action.prompt().to_string(),
            confirm_action: action,
            selected_option: false,
        });
    }

    pub fn schedule(&mut self, delay: Duration, action: AsyncAction) {
        self.scheduled_actions.push((Instant::now() + delay, action));
    }

    /// Moves the first due scheduled action into the pending slot if it is free.
    pub fn promote_scheduled(&mut self, now: Instant) {
        if self.pending_async_action.is_some() {
            return;
        }
        if let Some(idx) = self.scheduled_actions.iter().position(|(due, _)| *due <= now) {
            let (_, action) = self.scheduled_actions.remove(idx);
            self.pending_async_action = Some(action);
        }
    }

    pub fn cycle_status_filter(&mut self) {
        let filter = self.controller.filter().with_next_status();
        self.pending_async_action = Some(AsyncAction::ChangeFilter(filter));
    }

    pub fn cycle_type_filter(&mut self) {
        let filter = self.controller.filter().with_next_kind();
        self.pending_async_action = Some(AsyncAction::ChangeFilter(filter));
    }

    /// Dispatches the pending action. API work runs in the background; its
    /// outcome is applied by [`App::tick`].
    pub fn process_async_action(&mut self) {
        let Some(action) = self.pending_async_action.take() else {
            return;
        };

        match action {
            AsyncAction::Reload => self.controller.spawn_reload(),
            AsyncAction::ChangeFilter(filter) => self.controller.on_filter_change(filter),
            AsyncAction::CreateNotification => {
                if let Some(form) = self.compose_form.as_ref() {
                    self.controller.on_create(form);
                }
            }
            AsyncAction::DeleteNotification(id) => self.controller.on_delete(&id),
            AsyncAction::MarkRead(id) => self.controller.on_mark_read(&id),
            AsyncAction::MarkAllRead => self.controller.mark_all_read(),
            AsyncAction::ClearAll => self.controller.clear_all(),
        }

        self.clamp_selection();
    }

    /// Applies finished background work. A successful send closes the compose
    /// modal; a failed one leaves it open with its input.
    pub fn apply_completions(&mut self) -> Applied {
        let applied = self.controller.poll();
        self.absorb(applied)
    }

    /// Like [`Self::apply_completions`], but waits for all background work.
    pub async fn settle(&mut self) -> Applied {
        let applied = self.controller.settle().await;
        self.absorb(applied)
    }

    fn absorb(&mut self, applied: Applied) -> Applied {
        if applied.created() && self.current_view == View::Compose {
            self.compose_form = None;
            self.current_view = View::NotificationList;
        }
        if applied.view_changed() {
            self.clamp_selection();
        }
        applied
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(api: Arc<dyn NotificationApi>, config: &PanelConfig) -> Self {
        Self {
            state: AppState::new(api, config),
        }
    }

    /// Binds controls, starts the first load in the background and renders
    /// the clock.
    pub fn init(&mut self) {
        info!("Initializing notification panel");
        self.state.bind_listeners();
        self.state.controller.spawn_reload();
        if self.state.elements.clock {
            self.state.clock.tick(Instant::now());
        }
    }

    /// One pass of the UI loop's housekeeping. Never waits on the network.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.state.promote_scheduled(now);
        self.state.process_async_action();
        self.state.apply_completions();

        self.state.controller.toasts_mut().prune(now);

        if self.state.elements.clock {
            self.state.clock.tick(now);
        }
    }
}
