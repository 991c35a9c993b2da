// ABOUTME: Core data models for notification records, creation payloads and list filtering

pub mod notification;
pub mod time_ago;

pub use notification::{
    NewNotification, Notification, NotificationFilter, NotificationStatus, NotificationType,
    CUSTOM_RECIPIENTS,
};
pub use time_ago::format_time_ago;
