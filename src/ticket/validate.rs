//! Submit-time validation of a ticket snapshot.
//!
//! `validate` is a pure function: it never touches the network or the form
//! state. Errors come back in a fixed priority order (email, phone, issue type,
//! sub-reason, order reference, description, attachment) so a front-end that
//! surfaces only one error per attempt always surfaces the phone problem before
//! the order reference problem.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Field, TicketSubmission};
use crate::types::{ORDER_SUFFIX_DIGITS, PHONE_DIGITS};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Default attachment cap: 10 MiB
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// A validation failure tied to the field that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Size and type limits for the optional attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    /// Largest accepted attachment in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Accepted file extensions (lowercase, no dot). Empty accepts anything.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_ATTACHMENT_BYTES
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_extensions: Vec::new(),
        }
    }
}

impl AttachmentPolicy {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// The order reference is not the prefix plus the expected number of digits
pub fn order_reference_error(prefix: &str) -> FieldError {
    FieldError::new(
        Field::OrderReference,
        format!("Order ID must be {prefix} followed by exactly {ORDER_SUFFIX_DIGITS} digits"),
    )
}

/// The attachment is larger than the policy allows
pub fn attachment_too_large(file_name: &str, size: u64, max_bytes: u64) -> FieldError {
    FieldError::new(
        Field::Attachment,
        format!("Attachment '{file_name}' is {size} bytes; the limit is {max_bytes} bytes"),
    )
}

/// Every validation failure in the snapshot, highest priority first
pub fn validate(ticket: &TicketSubmission, policy: &AttachmentPolicy) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if ticket.email().is_empty() {
        errors.push(FieldError::new(Field::Email, "Email is required"));
    } else if !is_valid_email(ticket.email()) {
        errors.push(FieldError::new(
            Field::Email,
            "Please enter a valid email address",
        ));
    }

    if ticket.phone().is_empty() {
        errors.push(FieldError::new(Field::Phone, "Contact number is required"));
    } else if ticket.phone().len() != PHONE_DIGITS {
        errors.push(FieldError::new(
            Field::Phone,
            format!("Contact number must be exactly {PHONE_DIGITS} digits"),
        ));
    }

    match ticket.issue_type() {
        None => errors.push(FieldError::new(
            Field::IssueType,
            "Please choose an issue type",
        )),
        Some(issue) if issue.requires_sub_reason() && ticket.sub_reason().is_none() => {
            errors.push(FieldError::new(
                Field::SubReason,
                format!("Please choose a reason for your {}", issue.slug()),
            ));
        }
        Some(_) => {}
    }

    let order = ticket.order_reference();
    if ticket.order_reference_required() && !order.is_complete() {
        errors.push(order_reference_error(order.prefix()));
    }

    if ticket.description().trim().is_empty() {
        errors.push(FieldError::new(Field::Description, "Description is required"));
    }

    if let Some(attachment) = ticket.attachment() {
        if attachment.size() > policy.max_bytes {
            errors.push(attachment_too_large(
                attachment.file_name(),
                attachment.size(),
                policy.max_bytes,
            ));
        } else if !policy.allowed_extensions.is_empty() {
            let allowed = attachment.extension().is_some_and(|ext| {
                policy
                    .allowed_extensions
                    .iter()
                    .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            });
            if !allowed {
                errors.push(FieldError::new(
                    Field::Attachment,
                    format!(
                        "Attachment type not allowed. Accepted: {}",
                        policy.allowed_extensions.join(", ")
                    ),
                ));
            }
        }
    }

    errors
}

/// The single error to surface for a submit attempt, if any
pub fn first_error(ticket: &TicketSubmission, policy: &AttachmentPolicy) -> Option<FieldError> {
    validate(ticket, policy).into_iter().next()
}
