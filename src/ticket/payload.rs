//! Wire representation of a ticket.
//!
//! The receiving endpoint expects a `multipart/form-data` body with a stable
//! set of keys; empty fields are left out entirely.

use reqwest::multipart::{Form, Part};

use super::{Attachment, TicketSubmission};
use crate::error::Result;

/// Multipart keys understood by the submission endpoint
pub mod wire {
    pub const EMAIL: &str = "email";
    pub const CONTACT_NUMBER: &str = "contact_number";
    pub const FULL_NAME: &str = "full_name";
    pub const ISSUE_TYPE: &str = "issue_type";
    pub const SUB_REASON: &str = "sub_reason";
    pub const DESCRIPTION: &str = "description";
    pub const ORDER_ID: &str = "order_id";
    pub const PREFERRED_CONTACT_METHOD: &str = "preferred_contact_method";
    pub const MEDIA: &str = "media";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirePayload {
    fields: Vec<(&'static str, String)>,
    media: Option<Attachment>,
}

impl WirePayload {
    pub fn from_submission(ticket: &TicketSubmission) -> Self {
        let mut fields = Vec::new();
        let mut push = |key: &'static str, value: String| {
            if !value.trim().is_empty() {
                fields.push((key, value));
            }
        };

        push(wire::EMAIL, ticket.email().to_string());
        push(wire::CONTACT_NUMBER, ticket.phone().to_string());
        push(wire::FULL_NAME, ticket.full_name().trim().to_string());
        push(
            wire::ISSUE_TYPE,
            ticket.issue_type().map(|i| i.label().to_string()).unwrap_or_default(),
        );
        push(
            wire::SUB_REASON,
            ticket.sub_reason().map(|r| r.label().to_string()).unwrap_or_default(),
        );
        push(wire::DESCRIPTION, ticket.description().to_string());
        if !ticket.order_reference().is_blank() {
            push(wire::ORDER_ID, ticket.order_reference().value());
        }
        push(
            wire::PREFERRED_CONTACT_METHOD,
            ticket
                .preferred_contact_method()
                .map(|m| m.label().to_string())
                .unwrap_or_default(),
        );

        Self {
            fields,
            media: ticket.attachment().cloned(),
        }
    }

    /// Text fields in wire order
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn media(&self) -> Option<&Attachment> {
        self.media.as_ref()
    }

    /// Build the multipart body
    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        for (key, value) in self.fields {
            form = form.text(key, value);
        }
        if let Some(media) = self.media {
            let part = Part::stream_with_length(media.bytes(), media.size())
                .file_name(media.file_name().to_string())
                .mime_str(media.content_type())?;
            form = form.part(wire::MEDIA, part);
        }
        Ok(form)
    }
}
