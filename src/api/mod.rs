// ABOUTME: REST client for the notification admin API

pub mod client;
pub mod error;

pub use client::{HttpNotificationApi, NotificationApi, TRACING_TARGET};
pub use error::{ApiError, Result};

#[cfg(test)]
pub use client::MockNotificationApi;
