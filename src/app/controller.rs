// ABOUTME: Notification panel controller: owns the list snapshot and runs every API round-trip
// State changes always go through the API and end with a full reload; nothing is patched locally

use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, NotificationApi};
use crate::app::form::NotificationForm;
use crate::app::toast::ToastStack;
use crate::models::{Notification, NotificationFilter};

/// Tracing target for controller operations.
pub const TRACING_TARGET: &str = "notify_panel::controller";

/// What the list area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Loaded(Vec<Notification>),
    Failed,
}

/// Result of one list fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: u64,
    pub result: Result<Vec<Notification>, ApiError>,
}

/// A write request running in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Delete(String),
    ClearAll,
}

/// Finished background work, delivered over the controller's channel.
#[derive(Debug)]
pub enum Completion {
    Load(LoadOutcome),
    Write {
        kind: WriteKind,
        result: Result<(), ApiError>,
    },
}

/// What applying finished background work changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Applied {
    pub loads_applied: usize,
    pub loads_discarded: usize,
    /// Each finished write and whether it succeeded, in completion order.
    pub writes: Vec<(WriteKind, bool)>,
}

impl Applied {
    pub fn view_changed(&self) -> bool {
        self.loads_applied > 0
    }

    pub fn created(&self) -> bool {
        self.writes
            .iter()
            .any(|(kind, ok)| *kind == WriteKind::Create && *ok)
    }

    fn merge(&mut self, other: Self) {
        self.loads_applied += other.loads_applied;
        self.loads_discarded += other.loads_discarded;
        self.writes.extend(other.writes);
    }
}

pub struct NotificationPanelController {
    api: Arc<dyn NotificationApi>,
    snapshot: Vec<Notification>,
    filter: NotificationFilter,
    view: ListView,
    toasts: ToastStack,
    latest_ticket: u64,
    in_flight: usize,
    sending: bool,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl std::fmt::Debug for NotificationPanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPanelController")
            .field("snapshot", &self.snapshot.len())
            .field("filter", &self.filter)
            .field("view", &self.view)
            .field("latest_ticket", &self.latest_ticket)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl NotificationPanelController {
    pub fn new(api: Arc<dyn NotificationApi>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            snapshot: Vec::new(),
            filter: NotificationFilter::default(),
            view: ListView::Loading,
            toasts: ToastStack::new(),
            latest_ticket: 0,
            in_flight: 0,
            sending: false,
            tx,
            rx,
        }
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Rows currently rendered: the filtered snapshot, or nothing while
    /// loading or after a failed load.
    pub fn visible(&self) -> &[Notification] {
        match &self.view {
            ListView::Loaded(rows) => rows.as_slice(),
            ListView::Loading | ListView::Failed => &[],
        }
    }

    /// Last successful fetch, unfiltered.
    pub fn snapshot(&self) -> &[Notification] {
        &self.snapshot
    }

    pub fn filter(&self) -> &NotificationFilter {
        &self.filter
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastStack {
        &mut self.toasts
    }

    /// Whether a create request is still waiting for the server.
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Number of spawned loads and writes not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Issues a new load ticket and shows the loading placeholder.
    ///
    /// Any outcome carrying an older ticket is discarded when it arrives.
    pub fn begin_load(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.view = ListView::Loading;
        debug!(target: TRACING_TARGET, ticket = self.latest_ticket, "Loading notifications");
        self.latest_ticket
    }

    /// Applies a fetch result if it belongs to the newest load. Returns whether
    /// the view changed.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.ticket != self.latest_ticket {
            debug!(
                target: TRACING_TARGET,
                ticket = outcome.ticket,
                latest = self.latest_ticket,
                "Discarding stale notification load"
            );
            return false;
        }

        match outcome.result {
            Ok(notifications) => {
                info!(
                    target: TRACING_TARGET,
                    count = notifications.len(),
                    "Notifications loaded"
                );
                self.snapshot = notifications;
                self.view = ListView::Loaded(self.filter.apply(&self.snapshot));
            }
            Err(e) => {
                error!(target: TRACING_TARGET, "Failed to load notifications: {}", e);
                self.toasts.error(format!("Failed to load notifications: {e}"));
                self.view = ListView::Failed;
            }
        }
        true
    }

    /// Fetches the full collection and re-renders the filtered list, in the
    /// caller's task.
    pub async fn load_notifications(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.list().await;
        self.apply_load(LoadOutcome { ticket, result });
    }

    /// Starts a load in the background. The outcome is picked up by
    /// [`Self::poll`] or [`Self::settle`].
    pub fn spawn_reload(&mut self) {
        let ticket = self.begin_load();
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.list().await;
            Completion::Load(LoadOutcome { ticket, result })
        });
    }

    fn spawn_write<F>(&mut self, kind: WriteKind, request: F)
    where
        F: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        self.spawn(async move {
            let result = request.await;
            Completion::Write { kind, result }
        });
    }

    fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if tx.send(work.await).is_err() {
                debug!(target: TRACING_TARGET, "Controller dropped before background work finished");
            }
        });
    }

    /// Applies every piece of background work that has already finished.
    /// Never waits.
    pub fn poll(&mut self) -> Applied {
        let mut applied = Applied::default();
        while let Ok(completion) = self.rx.try_recv() {
            applied.merge(self.apply_completion(completion));
        }
        applied
    }

    /// Waits until no background work is left, including the reloads that
    /// finished writes start, applying everything on the way.
    pub async fn settle(&mut self) -> Applied {
        let mut applied = Applied::default();
        while self.in_flight > 0 {
            let Some(completion) = self.rx.recv().await else {
                break;
            };
            applied.merge(self.apply_completion(completion));
        }
        applied
    }

    fn apply_completion(&mut self, completion: Completion) -> Applied {
        self.in_flight = self.in_flight.saturating_sub(1);
        let mut applied = Applied::default();

        match completion {
            Completion::Load(outcome) => {
                if self.apply_load(outcome) {
                    applied.loads_applied += 1;
                } else {
                    applied.loads_discarded += 1;
                }
            }
            Completion::Write { kind, result } => {
                let ok = result.is_ok();
                self.apply_write(&kind, result);
                applied.writes.push((kind, ok));
            }
        }
        applied
    }

    fn apply_write(&mut self, kind: &WriteKind, result: Result<(), ApiError>) {
        match (kind, result) {
            (WriteKind::Create, Ok(())) => {
                self.sending = false;
                info!(target: TRACING_TARGET, "Notification sent");
                self.spawn_reload();
                self.toasts.success("Notification sent successfully");
            }
            (WriteKind::Create, Err(e)) => {
                self.sending = false;
                error!(target: TRACING_TARGET, "Failed to send notification: {}", e);
                self.toasts.error(format!("Failed to send notification: {e}"));
            }
            (WriteKind::Delete(id), Ok(())) => {
                info!(target: TRACING_TARGET, id = %id, "Notification deleted");
                self.toasts.success("Notification deleted successfully");
                self.spawn_reload();
            }
            (WriteKind::Delete(id), Err(e)) => {
                error!(target: TRACING_TARGET, id = %id, "Failed to delete notification: {}", e);
                self.toasts.error(format!("Failed to delete notification: {e}"));
            }
            (WriteKind::ClearAll, Ok(())) => {
                info!(target: TRACING_TARGET, "All notifications cleared");
                self.toasts.success("All notifications cleared successfully");
                self.spawn_reload();
            }
            (WriteKind::ClearAll, Err(e)) => {
                error!(target: TRACING_TARGET, "Failed to clear notifications: {}", e);
                self.toasts.error(format!("Failed to clear notifications: {e}"));
            }
        }
    }

    pub fn on_filter_change(&mut self, filter: NotificationFilter) {
        info!(
            target: TRACING_TARGET,
            status = filter.status_label(),
            kind = filter.kind_label(),
            "Filter changed"
        );
        self.filter = filter;
        self.spawn_reload();
    }

    /// Validates the form and sends it in the background. Returns `true` when
    /// the request went out; the outcome arrives as a [`WriteKind::Create`]
    /// completion. Invalid input raises an error toast and sends nothing.
    pub fn on_create(&mut self, form: &NotificationForm) -> bool {
        if self.sending {
            debug!(target: TRACING_TARGET, "Create already in flight, ignoring submit");
            return false;
        }

        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(target: TRACING_TARGET, "Rejected notification form: {}", e);
                self.toasts.error(format!("Failed to send notification: {e}"));
                return false;
            }
        };

        self.sending = true;
        let api = Arc::clone(&self.api);
        self.spawn_write(WriteKind::Create, async move { api.create(&payload).await });
        true
    }

    pub fn on_delete(&mut self, id: &str) {
        let api = Arc::clone(&self.api);
        let target = id.to_string();
        self.spawn_write(WriteKind::Delete(id.to_string()), async move {
            api.delete(&target).await
        });
    }

    /// Acknowledges the row and reloads. The API exposes no read-status
    /// update, so the record comes back unchanged.
    pub fn on_mark_read(&mut self, id: &str) {
        debug!(target: TRACING_TARGET, id, "Mark read is not persisted by the API");
        self.toasts.success("Notification marked as read");
        self.spawn_reload();
    }

    /// Same limitation as [`Self::on_mark_read`], for every row.
    pub fn mark_all_read(&mut self) {
        debug!(target: TRACING_TARGET, "Mark all read is not persisted by the API");
        self.toasts.success("All notifications marked as read");
        self.spawn_reload();
    }

    pub fn clear_all(&mut self) {
        let api = Arc::clone(&self.api);
        self.spawn_write(WriteKind::ClearAll, async move { api.delete_all().await });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockNotificationApi;
    use crate::app::toast::ToastKind;
    use crate::models::{NotificationStatus, NotificationType};
    use pretty_assertions::assert_eq;

    fn notification(id: &str, status: NotificationStatus) -> Notification {
        Notification {
            id: id.to_string(),
            title: format!("Title {id}"),
            message: format!("Message {id}"),
            kind: NotificationType::Info,
            priority: "low".to_string(),
            status,
            recipient_type: "all".to_string(),
            custom_recipients: None,
            send_email: false,
            is_active: true,
            created_at: None,
        }
    }

    fn controller(mock: MockNotificationApi) -> NotificationPanelController {
        NotificationPanelController::new(Arc::new(mock))
    }

    fn latest_toast(controller: &NotificationPanelController) -> (ToastKind, String) {
        let toast = controller.toasts().latest().expect("a toast");
        (toast.kind, toast.message.clone())
    }

    fn filled_form() -> NotificationForm {
        NotificationForm {
            title: "Hello".into(),
            message: "World".into(),
            ..NotificationForm::default()
        }
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot_and_applies_filter() {
        let mut mock = MockNotificationApi::new();
        mock.expect_list().times(1).returning(|| {
            Ok(vec![
                notification("1", NotificationStatus::Unread),
                notification("2", NotificationStatus::Read),
            ])
        });
        let mut controller = controller(mock);
        controller.filter = NotificationFilter {
            status: Some(NotificationStatus::Read),
            kind: None,
        };

        controller.load_notifications().await;

        assert_eq!(controller.snapshot().len(), 2);
        let ids: Vec<_> = controller.visible().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[tokio::test]
    async fn test_failed_load_shows_error_and_keeps_last_snapshot() {
        let mut mock = MockNotificationApi::new();
        let mut calls = 0;
        mock.expect_list().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![notification("1", NotificationStatus::Unread)])
            } else {
                Err(ApiError::Status {
                    status: 503,
                    message: "Service unavailable".to_string(),
                })
            }
        });
        let mut controller = controller(mock);

        controller.load_notifications().await;
        controller.load_notifications().await;

        assert_eq!(controller.view(), &ListView::Failed);
        assert!(controller.visible().is_empty());
        assert_eq!(controller.snapshot().len(), 1);
        assert_eq!(
            latest_toast(&controller),
            (
                ToastKind::Error,
                "Failed to load notifications: Service unavailable".to_string()
            )
        );
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut controller = controller(MockNotificationApi::new());
        let first = controller.begin_load();
        let second = controller.begin_load();

        let applied = controller.apply_load(LoadOutcome {
            ticket: second,
            result: Ok(vec![notification("new", NotificationStatus::Unread)]),
        });
        assert!(applied);

        let applied = controller.apply_load(LoadOutcome {
            ticket: first,
            result: Ok(vec![notification("old", NotificationStatus::Unread)]),
        });
        assert!(!applied);
        assert_eq!(controller.visible()[0].id, "new");
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_list() {
        let mut controller = controller(MockNotificationApi::new());
        let first = controller.begin_load();
        let second = controller.begin_load();

        controller.apply_load(LoadOutcome {
            ticket: second,
            result: Ok(vec![notification("1", NotificationStatus::Unread)]),
        });
        controller.apply_load(LoadOutcome {
            ticket: first,
            result: Err(ApiError::InvalidToken),
        });

        assert!(matches!(controller.view(), ListView::Loaded(rows) if rows.len() == 1));
        assert!(controller.toasts().is_empty());
    }

    #[test]
    fn test_invalid_form_sends_no_request() {
        let mut mock = MockNotificationApi::new();
        mock.expect_create().never();
        mock.expect_list().never();
        let mut controller = controller(mock);

        let form = NotificationForm {
            title: "   ".into(),
            message: "Body".into(),
            ..NotificationForm::default()
        };
        assert!(!controller.on_create(&form));
        assert_eq!(controller.in_flight(), 0);
        assert_eq!(
            latest_toast(&controller),
            (
                ToastKind::Error,
                "Failed to send notification: Missing required field: title".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_create_posts_unread_payload_then_reloads() {
        let mut mock = MockNotificationApi::new();
        mock.expect_create()
            .withf(|payload| {
                payload.title == "Hello"
                    && payload.status() == &NotificationStatus::Unread
                    && payload.is_active()
            })
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![notification("42", NotificationStatus::Unread)]));
        let mut controller = controller(mock);

        assert!(controller.on_create(&filled_form()));
        assert!(controller.is_sending());

        let applied = controller.settle().await;

        assert!(applied.created());
        assert_eq!(applied.loads_applied, 1);
        assert!(!controller.is_sending());
        assert_eq!(controller.visible().len(), 1);
        assert_eq!(
            latest_toast(&controller),
            (ToastKind::Success, "Notification sent successfully".to_string())
        );
    }

    #[tokio::test]
    async fn test_second_submit_ignored_while_sending() {
        let mut mock = MockNotificationApi::new();
        mock.expect_create().times(1).returning(|_| Ok(()));
        mock.expect_list().times(1).returning(|| Ok(Vec::new()));
        let mut controller = controller(mock);

        assert!(controller.on_create(&filled_form()));
        assert!(!controller.on_create(&filled_form()));

        controller.settle().await;
        assert!(!controller.is_sending());
    }

    #[tokio::test]
    async fn test_create_failure_reports_api_message() {
        let mut mock = MockNotificationApi::new();
        mock.expect_create().times(1).returning(|_| {
            Err(ApiError::Status {
                status: 400,
                message: "Title too long".to_string(),
            })
        });
        mock.expect_list().never();
        let mut controller = controller(mock);

        assert!(controller.on_create(&filled_form()));
        let applied = controller.settle().await;

        assert!(!applied.created());
        assert_eq!(applied.writes, vec![(WriteKind::Create, false)]);
        assert_eq!(
            latest_toast(&controller).1,
            "Failed to send notification: Title too long"
        );
    }

    #[tokio::test]
    async fn test_delete_calls_api_with_id() {
        let mut mock = MockNotificationApi::new();
        mock.expect_delete()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_list().times(1).returning(|| Ok(Vec::new()));
        let mut controller = controller(mock);

        controller.on_delete("abc");
        assert_eq!(controller.in_flight(), 1);
        controller.settle().await;

        assert_eq!(controller.view(), &ListView::Loaded(Vec::new()));
        assert_eq!(
            latest_toast(&controller),
            (ToastKind::Success, "Notification deleted successfully".to_string())
        );
    }

    #[tokio::test]
    async fn test_clear_all_failure_skips_reload() {
        let mut mock = MockNotificationApi::new();
        mock.expect_delete_all().times(1).returning(|| {
            Err(ApiError::Status {
                status: 403,
                message: "Forbidden".to_string(),
            })
        });
        mock.expect_list().never();
        let mut controller = controller(mock);

        controller.clear_all();
        controller.settle().await;

        assert_eq!(
            latest_toast(&controller),
            (ToastKind::Error, "Failed to clear notifications: Forbidden".to_string())
        );
    }

    #[tokio::test]
    async fn test_mark_read_only_reloads() {
        let mut mock = MockNotificationApi::new();
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![notification("1", NotificationStatus::Unread)]));
        mock.expect_create().never();
        mock.expect_delete().never();
        mock.expect_delete_all().never();
        let mut controller = controller(mock);

        controller.on_mark_read("1");
        assert_eq!(controller.view(), &ListView::Loading);
        controller.settle().await;

        assert_eq!(controller.visible()[0].status, NotificationStatus::Unread);
        assert_eq!(
            latest_toast(&controller),
            (ToastKind::Success, "Notification marked as read".to_string())
        );
    }

    #[tokio::test]
    async fn test_filter_change_reloads_in_background() {
        let mut mock = MockNotificationApi::new();
        mock.expect_list().times(1).returning(|| {
            Ok(vec![
                notification("1", NotificationStatus::Unread),
                notification("2", NotificationStatus::Read),
            ])
        });
        let mut controller = controller(mock);

        controller.on_filter_change(NotificationFilter {
            status: Some(NotificationStatus::Unread),
            kind: None,
        });
        assert_eq!(controller.view(), &ListView::Loading);

        let applied = controller.settle().await;
        assert!(applied.view_changed());
        let ids: Vec<_> = controller.visible().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_poll_without_finished_work_changes_nothing() {
        let mut controller = controller(MockNotificationApi::new());
        assert_eq!(controller.poll(), Applied::default());
        assert_eq!(controller.view(), &ListView::Loading);
    }
}
