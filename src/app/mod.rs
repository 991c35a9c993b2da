// ABOUTME: Main application structure and state management for the TUI

pub mod clock;
pub mod controller;
pub mod events;
pub mod form;
pub mod state;
pub mod toast;

pub use controller::{Applied, ListView, NotificationPanelController, WriteKind};
pub use events::{AppEvent, EventHandler};
pub use form::{FormError, FormField, NotificationForm};
pub use state::{App, AppState};
pub use toast::{Toast, ToastKind, ToastStack};
