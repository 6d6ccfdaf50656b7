//! Contact form validation and delivery
//!
//! A message is validated field by field and then handed to a
//! [`MessageRelay`]. Delivery services are opaque; the bundled
//! [`LogRelay`] only records the message in the log.

use std::fmt;
use std::sync::OnceLock;

use bitflags::bitflags;
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

bitflags! {
    /// Fields of the contact form
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FieldSet: u8 {
        const NAME    = 0b001;
        const EMAIL   = 0b010;
        const MESSAGE = 0b100;
    }
}

/// Kind of input, for single-field checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Invalid email")]
    InvalidEmail,
}

/// Fields that failed validation, with one message per failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidFields {
    pub fields: FieldSet,
    pub messages: Vec<&'static str>,
}

impl InvalidFields {
    fn push(&mut self, field: FieldSet, message: &'static str) {
        self.fields |= field;
        self.messages.push(message);
    }
}

impl fmt::Display for InvalidFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("; "))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Delivery service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Invalid contact form: {0}")]
    Invalid(InvalidFields),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// A message from the contact form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }
}

/// Delivery backend for contact messages
pub trait MessageRelay {
    fn send(&self, message: &ContactMessage) -> Result<(), RelayError>;
}

/// Relay that records messages in the log instead of delivering them
#[derive(Debug, Default)]
pub struct LogRelay;

impl MessageRelay for LogRelay {
    fn send(&self, message: &ContactMessage) -> Result<(), RelayError> {
        info!(
            sender = %message.name.trim(),
            email = %message.email.trim(),
            chars = message.message.trim().chars().count(),
            "Contact message received"
        );
        Ok(())
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Check a single input as it is edited
pub fn validate_field(kind: FieldKind, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if kind == FieldKind::Email && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// Check a whole message before sending
pub fn validate(message: &ContactMessage) -> Result<(), InvalidFields> {
    let mut invalid = InvalidFields::default();

    if message.name.trim().chars().count() < MIN_NAME_CHARS {
        invalid.push(FieldSet::NAME, "Name must be at least 2 characters");
    }
    // Unlike single-field checks, the whole-form email is matched as typed
    if !is_valid_email(&message.email) {
        invalid.push(FieldSet::EMAIL, "Please enter a valid email");
    }
    if message.message.trim().chars().count() < MIN_MESSAGE_CHARS {
        invalid.push(FieldSet::MESSAGE, "Message must be at least 10 characters");
    }

    if invalid.fields.is_empty() {
        Ok(())
    } else {
        Err(invalid)
    }
}

/// Validate a message and hand it to the relay
pub fn submit<R: MessageRelay + ?Sized>(relay: &R, message: &ContactMessage) -> Result<(), ContactError> {
    if let Err(invalid) = validate(message) {
        warn!("Contact form rejected: {}", invalid);
        return Err(ContactError::Invalid(invalid));
    }
    relay.send(message)?;
    Ok(())
}
