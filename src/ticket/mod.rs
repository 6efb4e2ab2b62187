//! The ticket snapshot a customer fills in.
//!
//! A `TicketSubmission` is never mutated in place: every field update produces
//! a new snapshot, so normalization rules (digits-only phone, prefixed order
//! reference, sub-reason cleared on issue type change) hold for every value a
//! caller can observe.

mod attachment;
mod payload;
mod validate;

pub use attachment::Attachment;
pub use payload::{WirePayload, wire};
pub use validate::{
    AttachmentPolicy, FieldError, attachment_too_large, first_error, order_reference_error,
    validate,
};

use std::fmt;

use crate::error::{Result, SupportError};
use crate::types::{
    ContactMethod, DEFAULT_ORDER_PREFIX, IssueType, ORDER_SUFFIX_DIGITS, SubReason,
};

/// Named fields of the ticket form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Phone,
    FullName,
    IssueType,
    SubReason,
    OrderReference,
    Description,
    ContactMethod,
    Attachment,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "Email ID",
            Field::Phone => "Contact Number",
            Field::FullName => "Full Name",
            Field::IssueType => "Issue Type",
            Field::SubReason => "Reason",
            Field::OrderReference => "Order ID",
            Field::Description => "Description",
            Field::ContactMethod => "Preferred Contact Method",
            Field::Attachment => "Attachment",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single-field change coming from user input
#[derive(Debug, Clone)]
pub enum FieldUpdate {
    Email(String),
    Phone(String),
    FullName(String),
    IssueType(Option<IssueType>),
    SubReason(Option<SubReason>),
    Description(String),
    /// Raw text typed after the order prefix
    OrderSuffix(String),
    ContactMethod(Option<ContactMethod>),
    Attachment(Option<Attachment>),
}

impl FieldUpdate {
    /// The field this update writes to
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Email(_) => Field::Email,
            FieldUpdate::Phone(_) => Field::Phone,
            FieldUpdate::FullName(_) => Field::FullName,
            FieldUpdate::IssueType(_) => Field::IssueType,
            FieldUpdate::SubReason(_) => Field::SubReason,
            FieldUpdate::Description(_) => Field::Description,
            FieldUpdate::OrderSuffix(_) => Field::OrderReference,
            FieldUpdate::ContactMethod(_) => Field::ContactMethod,
            FieldUpdate::Attachment(_) => Field::Attachment,
        }
    }
}

/// Strip everything but ASCII digits
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Order reference: fixed literal prefix plus the digits the customer typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReference {
    prefix: String,
    suffix: String,
}

impl OrderReference {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: String::new(),
        }
    }

    /// Replace the suffix with the digits of `input`, capped at the suffix length
    pub fn with_suffix(&self, input: &str) -> Self {
        let suffix = digits_only(input)
            .chars()
            .take(ORDER_SUFFIX_DIGITS)
            .collect();
        Self {
            prefix: self.prefix.clone(),
            suffix,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// True when the customer has not typed any digits
    pub fn is_blank(&self) -> bool {
        self.suffix.is_empty()
    }

    /// Prefix followed by exactly the expected number of digits
    pub fn is_complete(&self) -> bool {
        self.suffix.len() == ORDER_SUFFIX_DIGITS
    }

    /// The full reference as sent on the wire
    pub fn value(&self) -> String {
        format!("{}{}", self.prefix, self.suffix)
    }
}

impl Default for OrderReference {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_PREFIX)
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.suffix)
    }
}

/// Immutable snapshot of everything entered into the ticket form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketSubmission {
    email: String,
    phone: String,
    full_name: String,
    issue_type: Option<IssueType>,
    sub_reason: Option<SubReason>,
    description: String,
    order_reference: OrderReference,
    preferred_contact_method: Option<ContactMethod>,
    attachment: Option<Attachment>,
}

impl TicketSubmission {
    /// Empty snapshot whose order reference carries `order_prefix`
    pub fn new(order_prefix: impl Into<String>) -> Self {
        Self {
            order_reference: OrderReference::new(order_prefix),
            ..Default::default()
        }
    }

    /// Produce a new snapshot with one field changed.
    ///
    /// Fails only when a sub-reason is chosen that the current issue type does
    /// not offer; `self` is left untouched in that case.
    pub fn apply(&self, update: FieldUpdate) -> Result<Self> {
        let mut next = self.clone();
        match update {
            FieldUpdate::Email(value) => next.email = value.trim().to_string(),
            FieldUpdate::Phone(value) => next.phone = digits_only(&value),
            FieldUpdate::FullName(value) => next.full_name = value,
            FieldUpdate::IssueType(value) => {
                next.issue_type = value;
                next.sub_reason = None;
            }
            FieldUpdate::SubReason(None) => next.sub_reason = None,
            FieldUpdate::SubReason(Some(reason)) => {
                match self.issue_type {
                    Some(issue) if issue.allows(reason) => next.sub_reason = Some(reason),
                    issue => {
                        return Err(SupportError::InvalidSubReason {
                            issue_type: issue
                                .map(|i| i.label().to_string())
                                .unwrap_or_else(|| "an unset issue type".to_string()),
                            reason: reason.label().to_string(),
                        });
                    }
                }
            }
            FieldUpdate::Description(value) => next.description = value,
            FieldUpdate::OrderSuffix(value) => {
                next.order_reference = self.order_reference.with_suffix(&value)
            }
            FieldUpdate::ContactMethod(value) => next.preferred_contact_method = value,
            FieldUpdate::Attachment(value) => next.attachment = value,
        }
        Ok(next)
    }

    /// Apply several updates in order, stopping at the first rejected one
    pub fn apply_all(&self, updates: impl IntoIterator<Item = FieldUpdate>) -> Result<Self> {
        updates
            .into_iter()
            .try_fold(self.clone(), |snapshot, update| snapshot.apply(update))
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn issue_type(&self) -> Option<IssueType> {
        self.issue_type
    }

    pub fn sub_reason(&self) -> Option<SubReason> {
        self.sub_reason
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn order_reference(&self) -> &OrderReference {
        &self.order_reference
    }

    pub fn preferred_contact_method(&self) -> Option<ContactMethod> {
        self.preferred_contact_method
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Whether the order reference must be filled in for the current issue type
    pub fn order_reference_required(&self) -> bool {
        self.issue_type
            .is_none_or(|issue| issue.requires_order_reference())
    }

    /// Sub-reasons offered for the current issue type
    pub fn sub_reason_options(&self) -> &'static [SubReason] {
        self.issue_type.map(|i| i.sub_reasons()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> TicketSubmission {
        TicketSubmission::new(DEFAULT_ORDER_PREFIX)
    }

    #[test]
    fn test_phone_is_digits_only() {
        let inputs = ["(987) 654-3210", "+91 98765 43210", "abc", "98-76", ""];
        for input in inputs {
            let t = blank().apply(FieldUpdate::Phone(input.to_string())).unwrap();
            assert!(t.phone().chars().all(|c| c.is_ascii_digit()), "{input}");
        }
        let t = blank()
            .apply(FieldUpdate::Phone("(987) 654-3210".to_string()))
            .unwrap();
        assert_eq!(t.phone(), "9876543210");
    }

    #[test]
    fn test_order_suffix_keeps_prefix() {
        let t = blank()
            .apply(FieldUpdate::OrderSuffix("00-12a34".to_string()))
            .unwrap();
        assert_eq!(t.order_reference().suffix(), "001234");
        assert_eq!(t.order_reference().value(), "#PM1570001234");
    }

    #[test]
    fn test_order_suffix_capped() {
        let t = blank()
            .apply(FieldUpdate::OrderSuffix("123456789".to_string()))
            .unwrap();
        assert_eq!(t.order_reference().suffix(), "123456");
        assert!(t.order_reference().is_complete());
    }

    #[test]
    fn test_custom_prefix() {
        let t = TicketSubmission::new("#XY")
            .apply(FieldUpdate::OrderSuffix("42".to_string()))
            .unwrap();
        assert_eq!(t.order_reference().to_string(), "#XY42");
        assert!(!t.order_reference().is_complete());
    }

    #[test]
    fn test_issue_type_change_clears_sub_reason() {
        let t = blank()
            .apply_all([
                FieldUpdate::IssueType(Some(IssueType::Return)),
                FieldUpdate::SubReason(Some(SubReason::DamagedItem)),
            ])
            .unwrap();
        assert_eq!(t.sub_reason(), Some(SubReason::DamagedItem));

        for issue in IssueType::ALL {
            let changed = t.apply(FieldUpdate::IssueType(Some(*issue))).unwrap();
            assert_eq!(changed.sub_reason(), None, "{issue}");
        }
        let cleared = t.apply(FieldUpdate::IssueType(None)).unwrap();
        assert_eq!(cleared.sub_reason(), None);
    }

    #[test]
    fn test_sub_reason_rejected_for_wrong_issue_type() {
        let t = blank()
            .apply(FieldUpdate::IssueType(Some(IssueType::OrderStatus)))
            .unwrap();
        let err = t
            .apply(FieldUpdate::SubReason(Some(SubReason::DamagedItem)))
            .unwrap_err();
        assert!(matches!(err, SupportError::InvalidSubReason { .. }));

        let err = blank()
            .apply(FieldUpdate::SubReason(Some(SubReason::SizeIssue)))
            .unwrap_err();
        assert!(err.to_string().contains("unset issue type"));
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let original = blank();
        let _ = original
            .apply(FieldUpdate::Email("a@b.co".to_string()))
            .unwrap();
        assert_eq!(original, blank());
    }

    #[test]
    fn test_order_reference_required() {
        assert!(blank().order_reference_required());
        let brand = blank()
            .apply(FieldUpdate::IssueType(Some(IssueType::BrandAlliance)))
            .unwrap();
        assert!(!brand.order_reference_required());
    }

    #[test]
    fn test_field_update_targets() {
        assert_eq!(
            FieldUpdate::OrderSuffix(String::new()).field(),
            Field::OrderReference
        );
        assert_eq!(FieldUpdate::Phone(String::new()).field(), Field::Phone);
    }
}
