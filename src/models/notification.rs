// ABOUTME: Notification record as served by the admin API, plus the creation payload and list filter
// Type and status are string-backed so values the panel does not know about still round-trip

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationType {
    Info,
    Warning,
    Alert,
    Other(String),
}

impl NotificationType {
    /// Choices offered by the compose form, in display order.
    pub fn choices() -> Vec<Self> {
        vec![
            Self::Info,
            Self::Warning,
            Self::Alert,
            Self::Other("other".to_string()),
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Alert => "alert",
            Self::Other(raw) => raw,
        }
    }

    /// Glyph standing in for the icon font: info-circle, exclamation-triangle,
    /// exclamation-circle, and a generic bell for everything else.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Alert => "‼",
            Self::Other(_) => "🔔",
        }
    }

    /// Wire value with the first letter upper-cased ("info" -> "Info").
    pub fn label(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for NotificationType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for NotificationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "alert" => Self::Alert,
            _ => Self::Other(value),
        }
    }
}

impl From<NotificationType> for String {
    fn from(value: NotificationType) -> Self {
        match value {
            NotificationType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationStatus {
    #[default]
    Unread,
    Read,
    Other(String),
}

impl NotificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_unread(&self) -> bool {
        matches!(self, Self::Unread)
    }
}

impl From<String> for NotificationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unread" => Self::Unread,
            "read" => Self::Read,
            _ => Self::Other(value),
        }
    }
}

impl From<NotificationStatus> for String {
    fn from(value: NotificationStatus) -> Self {
        match value {
            NotificationStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipient type that enables the free-form `customRecipients` field.
pub const CUSTOM_RECIPIENTS: &str = "custom";

/// A server-owned notification. The panel never mutates one locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: NotificationStatus,
    #[serde(default)]
    pub recipient_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_recipients: Option<String>,
    #[serde(default)]
    pub send_email: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

/// Body of `POST notifications`.
///
/// `status` and `isActive` are not caller-controlled: every new notification
/// starts out unread and active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub priority: String,
    pub recipient_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_recipients: Option<String>,
    pub send_email: bool,
    status: NotificationStatus,
    is_active: bool,
}

impl NewNotification {
    pub fn new(
        title: String,
        message: String,
        kind: NotificationType,
        priority: String,
        recipient_type: String,
        custom_recipients: Option<String>,
        send_email: bool,
    ) -> Self {
        let custom_recipients = if recipient_type == CUSTOM_RECIPIENTS {
            custom_recipients
        } else {
            None
        };

        Self {
            title,
            message,
            kind,
            priority,
            recipient_type,
            custom_recipients,
            send_email,
            status: NotificationStatus::Unread,
            is_active: true,
        }
    }

    pub fn status(&self) -> &NotificationStatus {
        &self.status
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Client-side list filter. An unset field matches everything; a set field
/// must match the record's wire value exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub status: Option<NotificationStatus>,
    pub kind: Option<NotificationType>,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        if let Some(status) = &self.status {
            if status.as_str() != notification.status.as_str() {
                return false;
            }
        }
        if let Some(kind) = &self.kind {
            if kind.as_str() != notification.kind.as_str() {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, notifications: &[Notification]) -> Vec<Notification> {
        notifications
            .iter()
            .filter(|notification| self.matches(notification))
            .cloned()
            .collect()
    }

    /// all -> unread -> read -> all
    pub fn with_next_status(&self) -> Self {
        let status = match self.status {
            None => Some(NotificationStatus::Unread),
            Some(NotificationStatus::Unread) => Some(NotificationStatus::Read),
            Some(_) => None,
        };
        Self {
            status,
            kind: self.kind.clone(),
        }
    }

    /// all -> each type choice in order -> all
    pub fn with_next_kind(&self) -> Self {
        let choices = NotificationType::choices();
        let kind = match &self.kind {
            None => choices.first().cloned(),
            Some(current) => choices
                .iter()
                .position(|choice| choice == current)
                .and_then(|idx| choices.get(idx + 1).cloned()),
        };
        Self {
            status: self.status.clone(),
            kind,
        }
    }

    pub fn status_label(&self) -> &str {
        self.status.as_ref().map_or("all", NotificationStatus::as_str)
    }

    pub fn kind_label(&self) -> &str {
        self.kind.as_ref().map_or("all", NotificationType::as_str)
    }
}
