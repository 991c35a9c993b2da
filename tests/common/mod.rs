// ABOUTME: Shared test fixtures: an in-memory notification API and record builders
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use notify_panel::api::{ApiError, NotificationApi, Result};
use notify_panel::models::{NewNotification, Notification, NotificationStatus, NotificationType};

/// Behaves like the real service: every write is visible to the next list.
#[derive(Default)]
pub struct InMemoryApi {
    store: Mutex<Vec<Notification>>,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_writes: AtomicBool,
    /// Artificial latency applied to every call, in milliseconds.
    pub latency_ms: AtomicU64,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Notification>) -> Self {
        let api = Self::default();
        *api.store.lock().unwrap() = records;
        api
    }

    pub fn records(&self) -> Vec<Notification> {
        self.store.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    async fn wait(&self) {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
    }

    fn server_error(&self) -> ApiError {
        ApiError::Status {
            status: 500,
            message: "Internal server error".to_string(),
        }
    }
}

#[async_trait]
impl NotificationApi for InMemoryApi {
    async fn list(&self) -> Result<Vec<Notification>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(self.server_error());
        }
        Ok(self.records())
    }

    async fn create(&self, payload: &NewNotification) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.server_error());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Notification {
            id: format!("generated-{id}"),
            title: payload.title.clone(),
            message: payload.message.clone(),
            kind: payload.kind.clone(),
            priority: payload.priority.clone(),
            status: payload.status().clone(),
            recipient_type: payload.recipient_type.clone(),
            custom_recipients: payload.custom_recipients.clone(),
            send_email: payload.send_email,
            is_active: payload.is_active(),
            created_at: Some(Utc::now()),
        };
        self.store.lock().unwrap().push(created);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.server_error());
        }

        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|n| n.id != id);
        if store.len() == before {
            return Err(ApiError::Status {
                status: 404,
                message: "Notification not found".to_string(),
            });
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.server_error());
        }
        self.store.lock().unwrap().clear();
        Ok(())
    }
}

pub fn record(id: &str, title: &str, status: NotificationStatus, kind: NotificationType) -> Notification {
    Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: format!("{title} details"),
        kind,
        priority: "high".to_string(),
        status,
        recipient_type: "all".to_string(),
        custom_recipients: None,
        send_email: false,
        is_active: true,
        created_at: Some(Utc::now()),
    }
}

/// Four records covering both statuses and three types.
pub fn seeded() -> Vec<Notification> {
    vec![
        record("1", "Deploy finished", NotificationStatus::Unread, NotificationType::Info),
        record("2", "Disk almost full", NotificationStatus::Unread, NotificationType::Warning),
        record("3", "Old maintenance", NotificationStatus::Read, NotificationType::Warning),
        record("4", "Breach detected", NotificationStatus::Read, NotificationType::Alert),
    ]
}
