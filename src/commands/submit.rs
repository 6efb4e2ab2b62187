use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions};
use crate::config::Config;
use crate::error::{Result, SupportError};
use crate::form::TicketForm;
use crate::submit::Submitter;
use crate::ticket::{Attachment, FieldUpdate, order_reference_error};
use crate::types::{ContactMethod, IssueType, ORDER_SUFFIX_DIGITS, SubReason};

pub const SUCCESS_MESSAGE: &str = "Support request submitted successfully!";

/// Options for submitting a ticket from the command line
#[derive(Debug, Default)]
pub struct SubmitOptions {
    pub email: String,
    pub phone: String,
    pub issue_type: Option<IssueType>,
    pub sub_reason: Option<SubReason>,
    pub description: String,
    pub order: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_method: Option<ContactMethod>,
    pub attachment: Option<PathBuf>,
    pub endpoint: Option<String>,
}

impl SubmitOptions {
    /// Full name, or first and last name joined by a space
    fn full_name(&self) -> Option<String> {
        if let Some(name) = &self.full_name {
            return Some(name.clone());
        }
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }

    /// Order input with the configured prefix stripped, if the user typed it
    fn order_suffix<'a>(&'a self, prefix: &str) -> Option<&'a str> {
        self.order.as_deref().map(|order| {
            let order = order.trim();
            order.strip_prefix(prefix).unwrap_or(order)
        })
    }

    /// The order suffix, refused unless it is nothing but the expected digits.
    ///
    /// The form caps typing at the suffix length; a flag value arrives whole,
    /// so an overlong or mis-prefixed value is an error instead of being cut.
    fn checked_order_suffix<'a>(&'a self, prefix: &str) -> Result<Option<&'a str>> {
        match self.order_suffix(prefix) {
            Some(suffix)
                if suffix.len() > ORDER_SUFFIX_DIGITS
                    || !suffix.chars().all(|c| c.is_ascii_digit()) =>
            {
                Err(SupportError::Validation(order_reference_error(prefix)))
            }
            suffix => Ok(suffix),
        }
    }

    fn updates(&self, config: &Config) -> Result<Vec<FieldUpdate>> {
        let mut updates = vec![
            FieldUpdate::Email(self.email.clone()),
            FieldUpdate::Phone(self.phone.clone()),
            FieldUpdate::IssueType(self.issue_type),
            FieldUpdate::SubReason(self.sub_reason),
            FieldUpdate::Description(self.description.clone()),
            FieldUpdate::ContactMethod(self.contact_method),
        ];
        if let Some(suffix) = self.checked_order_suffix(&config.order_prefix)? {
            updates.push(FieldUpdate::OrderSuffix(suffix.to_string()));
        }
        if let Some(name) = self.full_name() {
            updates.push(FieldUpdate::FullName(name));
        }
        if let Some(path) = &self.attachment {
            let attachment = Attachment::from_path(path, config.attachment.max_bytes)?;
            updates.push(FieldUpdate::Attachment(Some(attachment)));
        }
        Ok(updates)
    }
}

/// Validate and submit a ticket without the interactive form
pub async fn cmd_submit(options: SubmitOptions, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let mut form = TicketForm::new(config.order_prefix.clone(), config.attachment.clone());

    for update in options.updates(&config)? {
        form.update(update)?;
    }

    let pending = form.begin_submit()?;
    let order_reference = pending.snapshot.order_reference();
    let order_id = (!order_reference.is_blank()).then(|| order_reference.value());

    let outcome = match Submitter::from_config(&config, options.endpoint.as_deref()) {
        Ok(submitter) => submitter.deliver(pending).await,
        Err(e) => Err(e),
    };
    let receipt = form.finish(outcome)?;

    let mut text_output = SUCCESS_MESSAGE.green().to_string();
    if let Some(message) = &receipt.message {
        text_output.push_str(&format!("\n{}", message.dimmed()));
    }

    CommandOutput::new(json!({
        "action": "submit",
        "success": true,
        "status": receipt.status,
        "idempotency_key": receipt.idempotency_key.to_string(),
        "order_id": order_id,
        "message": receipt.message,
    }))
    .with_text(text_output)
    .print(output)
}
