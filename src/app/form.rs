// ABOUTME: Compose-form state for new notifications: field focus, editing and validation
// Values are read straight from the fields at submit time; nothing is sent until validation passes

use thiserror::Error;

use crate::models::{NewNotification, NotificationType, CUSTOM_RECIPIENTS};

pub const PRIORITIES: [&str; 3] = ["low", "medium", "high"];
pub const RECIPIENT_TYPES: [&str; 2] = ["all", CUSTOM_RECIPIENTS];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Message,
    Type,
    Priority,
    RecipientType,
    CustomRecipients,
    SendEmail,
}

impl FormField {
    const ORDER: [Self; 7] = [
        Self::Title,
        Self::Message,
        Self::Type,
        Self::Priority,
        Self::RecipientType,
        Self::CustomRecipients,
        Self::SendEmail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Message => "Message",
            Self::Type => "Type",
            Self::Priority => "Priority",
            Self::RecipientType => "Recipients",
            Self::CustomRecipients => "Custom Recipients",
            Self::SendEmail => "Send Email",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Message | Self::CustomRecipients)
    }

    pub fn is_selector(self) -> bool {
        matches!(self, Self::Type | Self::Priority | Self::RecipientType)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationForm {
    pub title: String,
    pub message: String,
    pub kind: NotificationType,
    pub priority: String,
    pub recipient_type: String,
    pub custom_recipients: String,
    pub send_email: bool,
    pub focus: FormField,
}

impl Default for NotificationForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: NotificationType::Info,
            priority: PRIORITIES[1].to_string(),
            recipient_type: RECIPIENT_TYPES[0].to_string(),
            custom_recipients: String::new(),
            send_email: false,
            focus: FormField::Title,
        }
    }
}

impl NotificationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every field, the message included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn custom_recipients_visible(&self) -> bool {
        self.recipient_type == CUSTOM_RECIPIENTS
    }

    /// Fields currently shown, in tab order.
    pub fn visible_fields(&self) -> Vec<FormField> {
        FormField::ORDER
            .into_iter()
            .filter(|field| *field != FormField::CustomRecipients || self.custom_recipients_visible())
            .collect()
    }

    pub fn next_field(&mut self) {
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(current + 1) % fields.len()];
    }

    pub fn previous_field(&mut self) {
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = if current == 0 {
            fields[fields.len() - 1]
        } else {
            fields[current - 1]
        };
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Message => Some(&mut self.message),
            FormField::CustomRecipients => Some(&mut self.custom_recipients),
            _ => None,
        }
    }

    pub fn input_char(&mut self, ch: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Steps the focused selector forward (`forward = true`) or back.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Type => {
                let choices = NotificationType::choices();
                let current = choices.iter().position(|c| *c == self.kind).unwrap_or(0);
                self.kind = choices[step(current, choices.len(), forward)].clone();
            }
            FormField::Priority => {
                let current = PRIORITIES.iter().position(|p| *p == self.priority).unwrap_or(0);
                self.priority = PRIORITIES[step(current, PRIORITIES.len(), forward)].to_string();
            }
            FormField::RecipientType => {
                let current = RECIPIENT_TYPES
                    .iter()
                    .position(|r| *r == self.recipient_type)
                    .unwrap_or(0);
                self.recipient_type =
                    RECIPIENT_TYPES[step(current, RECIPIENT_TYPES.len(), forward)].to_string();
            }
            _ => {}
        }
    }

    pub fn toggle_send_email(&mut self) {
        if self.focus == FormField::SendEmail {
            self.send_email = !self.send_email;
        }
    }

    /// Message is checked before title, and the first failure wins.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.message.trim().is_empty() {
            return Err(FormError::MissingField("message"));
        }
        if self.title.trim().is_empty() {
            return Err(FormError::MissingField("title"));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<NewNotification, FormError> {
        self.validate()?;
        Ok(NewNotification::new(
            self.title.clone(),
            self.message.clone(),
            self.kind.clone(),
            self.priority.clone(),
            self.recipient_type.clone(),
            Some(self.custom_recipients.clone()),
            self.send_email,
        ))
    }
}

const fn step(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}
