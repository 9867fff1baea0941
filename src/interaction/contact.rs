//! The support contact form; validated locally, never sent anywhere.

use std::sync::LazyLock;

use regex::Regex;

use super::Notice;

pub const INCOMPLETE: &str = "Please complete all fields.";
pub const INVALID_EMAIL: &str = "Please provide a valid email address.";
pub const RECORDED: &str = "Thanks — your message has been recorded (demo).";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Validate and "record" the message.
    pub fn submit(&self) -> Notice {
        let (name, email, message) = (self.name.trim(), self.email.trim(), self.message.trim());

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Notice::error(INCOMPLETE);
        }

        if !is_valid_email(email) {
            return Notice::error(INVALID_EMAIL);
        }

        Notice::success(RECORDED)
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `local@domain.tld` with a single `@` and no whitespace, where whitespace includes U+FEFF.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
