//! Ticket form state machine.
//!
//! `TicketForm` owns the current snapshot, the snapshot it resets to, and the
//! submission status. Front-ends drive it through three calls: `update` for
//! each keystroke, `begin_submit` when the customer submits, and `finish` with
//! the outcome of the request.
//!
//! ```text
//! Idle --begin_submit--> Submitting --finish(Ok)--> Succeeded --update--> Idle
//!                                   \--finish(Err)-> Failed    --update--> Idle
//! ```

use uuid::Uuid;

use crate::error::{Result, SupportError};
use crate::submit::SubmissionReceipt;
use crate::ticket::{AttachmentPolicy, FieldError, FieldUpdate, TicketSubmission, first_error};

/// Where the current submission cycle stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionStatus {
    /// Inputs are locked while a request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Succeeded | SubmissionStatus::Failed(_))
    }
}

/// A validated snapshot on its way to the endpoint
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    /// Sent as the `Idempotency-Key` header
    pub idempotency_key: Uuid,
    pub snapshot: TicketSubmission,
}

#[derive(Debug, Clone)]
pub struct TicketForm {
    initial: TicketSubmission,
    current: TicketSubmission,
    status: SubmissionStatus,
    field_error: Option<FieldError>,
    policy: AttachmentPolicy,
}

impl TicketForm {
    pub fn new(order_prefix: impl Into<String>, policy: AttachmentPolicy) -> Self {
        let initial = TicketSubmission::new(order_prefix);
        Self {
            current: initial.clone(),
            initial,
            status: SubmissionStatus::Idle,
            field_error: None,
            policy,
        }
    }

    pub fn snapshot(&self) -> &TicketSubmission {
        &self.current
    }

    pub fn initial_snapshot(&self) -> &TicketSubmission {
        &self.initial
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// The validation error surfaced by the last submit attempt
    pub fn field_error(&self) -> Option<&FieldError> {
        self.field_error.as_ref()
    }

    pub fn policy(&self) -> &AttachmentPolicy {
        &self.policy
    }

    /// Apply one field change.
    ///
    /// Editing after a finished submission starts a new cycle. Editing the
    /// field that carries the surfaced error clears that error.
    pub fn update(&mut self, update: FieldUpdate) -> Result<()> {
        if self.status.is_busy() {
            return Err(SupportError::SubmissionInFlight);
        }

        let field = update.field();
        self.current = self.current.apply(update)?;

        if self.status.is_terminal() {
            self.status = SubmissionStatus::Idle;
        }
        if self.field_error.as_ref().is_some_and(|e| e.field == field) {
            self.field_error = None;
        }
        Ok(())
    }

    /// Run the validation gate and, if it passes, move to `Submitting`.
    ///
    /// A second call while a request is in flight is refused, whatever the UI
    /// does with its submit button.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission> {
        if self.status.is_busy() {
            return Err(SupportError::SubmissionInFlight);
        }

        if let Some(error) = first_error(&self.current, &self.policy) {
            tracing::debug!(field = %error.field, "ticket blocked by validation");
            self.status = SubmissionStatus::Idle;
            self.field_error = Some(error.clone());
            return Err(SupportError::Validation(error));
        }

        self.field_error = None;
        self.status = SubmissionStatus::Submitting;
        Ok(PendingSubmission {
            idempotency_key: Uuid::new_v4(),
            snapshot: self.current.clone(),
        })
    }

    /// Record the outcome of the request and pass it through.
    ///
    /// Success resets the form to its initial snapshot; failure keeps what the
    /// customer typed so they can retry.
    pub fn finish(&mut self, outcome: Result<SubmissionReceipt>) -> Result<SubmissionReceipt> {
        match &outcome {
            Ok(_) => {
                self.status = SubmissionStatus::Succeeded;
                self.current = self.initial.clone();
            }
            Err(e) => {
                self.status = SubmissionStatus::Failed(e.to_string());
            }
        }
        outcome
    }

    /// Drop everything typed so far and return to the initial snapshot
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.status = SubmissionStatus::Idle;
        self.field_error = None;
    }
}

impl Default for TicketForm {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_ORDER_PREFIX, AttachmentPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::Field;
    use crate::types::{IssueType, SubReason};

    fn filled_form() -> TicketForm {
        let mut form = TicketForm::default();
        for update in [
            FieldUpdate::Email("shopper@example.com".to_string()),
            FieldUpdate::Phone("9876543210".to_string()),
            FieldUpdate::IssueType(Some(IssueType::Return)),
            FieldUpdate::SubReason(Some(SubReason::DamagedItem)),
            FieldUpdate::OrderSuffix("001234".to_string()),
            FieldUpdate::Description("Strap arrived torn".to_string()),
        ] {
            form.update(update).unwrap();
        }
        form
    }

    fn receipt() -> SubmissionReceipt {
        SubmissionReceipt {
            idempotency_key: Uuid::nil(),
            status: 200,
            message: None,
        }
    }

    #[test]
    fn test_validation_failure_stays_idle() {
        let mut form = filled_form();
        form.update(FieldUpdate::Phone("98765432".to_string()))
            .unwrap();

        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, SupportError::Validation(_)));
        assert_eq!(form.status(), &SubmissionStatus::Idle);
        assert_eq!(form.field_error().map(|e| e.field), Some(Field::Phone));
    }

    #[test]
    fn test_editing_errored_field_clears_error() {
        let mut form = filled_form();
        form.update(FieldUpdate::Phone("1".to_string())).unwrap();
        let _ = form.begin_submit();

        form.update(FieldUpdate::Email("x@y.zz".to_string())).unwrap();
        assert!(form.field_error().is_some());

        form.update(FieldUpdate::Phone("9876543210".to_string()))
            .unwrap();
        assert!(form.field_error().is_none());
    }

    #[test]
    fn test_double_submit_refused() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        assert_eq!(form.status(), &SubmissionStatus::Submitting);

        assert!(matches!(
            form.begin_submit(),
            Err(SupportError::SubmissionInFlight)
        ));
        assert!(matches!(
            form.update(FieldUpdate::Description("more".to_string())),
            Err(SupportError::SubmissionInFlight)
        ));
    }

    #[test]
    fn test_success_resets_to_initial() {
        let mut form = filled_form();
        let pending = form.begin_submit().unwrap();
        assert_eq!(
            pending.snapshot.order_reference().value(),
            "#PM1570001234"
        );

        form.finish(Ok(receipt())).unwrap();
        assert_eq!(form.status(), &SubmissionStatus::Succeeded);
        assert_eq!(form.snapshot(), form.initial_snapshot());
        assert_eq!(form.snapshot(), TicketForm::default().snapshot());
        assert_eq!(form.snapshot().order_reference().prefix(), "#PM157");
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = filled_form();
        let before = form.snapshot().clone();
        form.begin_submit().unwrap();

        let result = form.finish(Err(SupportError::Rejected {
            status: 500,
            message: "server error".to_string(),
        }));
        assert!(result.is_err());
        assert_eq!(
            form.status(),
            &SubmissionStatus::Failed("server error".to_string())
        );
        assert_eq!(form.snapshot(), &before);
    }

    #[test]
    fn test_edit_after_terminal_returns_to_idle() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        let _ = form.finish(Err(SupportError::Other("boom".to_string())));

        form.update(FieldUpdate::Description("retry".to_string()))
            .unwrap();
        assert_eq!(form.status(), &SubmissionStatus::Idle);
    }

    #[test]
    fn test_idempotency_keys_differ_per_attempt() {
        let mut form = filled_form();
        let first = form.begin_submit().unwrap();
        let _ = form.finish(Err(SupportError::Other("boom".to_string())));
        let second = form.begin_submit().unwrap();
        assert_ne!(first.idempotency_key, second.idempotency_key);
    }

    #[test]
    fn test_reset() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form.snapshot(), form.initial_snapshot());
        assert_eq!(form.status(), &SubmissionStatus::Idle);
    }
}
