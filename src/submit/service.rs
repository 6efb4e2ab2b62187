//! Submission orchestration: validate, send, interpret, record.

use crate::config::Config;
use crate::error::{Result, SupportError};
use crate::form::{PendingSubmission, TicketForm};
use crate::ticket::WirePayload;

use super::{HttpTransport, SubmissionReceipt, SubmitTransport, SuccessContract, Verdict, interpret};

/// Sends tickets through a transport and judges the answers
pub struct Submitter<T> {
    transport: T,
    contract: SuccessContract,
}

impl Submitter<HttpTransport> {
    /// Build an HTTP submitter from configuration.
    ///
    /// `endpoint_override` (the `--endpoint` flag) wins over the environment
    /// and the config file.
    pub fn from_config(config: &Config, endpoint_override: Option<&str>) -> Result<Self> {
        let endpoint = config.endpoint_url(endpoint_override)?;
        let transport =
            HttpTransport::new(endpoint, config.request_timeout(), config.accept_json)?;
        Ok(Self::new(transport, config.success_contract))
    }
}

impl<T: SubmitTransport> Submitter<T> {
    pub fn new(transport: T, contract: SuccessContract) -> Self {
        Self {
            transport,
            contract,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn contract(&self) -> SuccessContract {
        self.contract
    }

    /// Send an already-validated snapshot
    pub async fn deliver(&self, pending: PendingSubmission) -> Result<SubmissionReceipt> {
        let key = pending.idempotency_key;
        let payload = WirePayload::from_submission(&pending.snapshot);

        tracing::info!(
            idempotency_key = %key,
            fields = payload.fields().len(),
            has_media = payload.media().is_some(),
            "submitting support ticket"
        );

        let response = self
            .transport
            .send(payload, key)
            .await
            .inspect_err(|e| tracing::warn!(idempotency_key = %key, "submission failed: {e}"))?;

        match interpret(&response, self.contract) {
            Verdict::Accepted { message } => {
                tracing::info!(idempotency_key = %key, status = response.status, "ticket accepted");
                Ok(SubmissionReceipt {
                    idempotency_key: key,
                    status: response.status,
                    message,
                })
            }
            Verdict::Rejected { message } => {
                tracing::warn!(
                    idempotency_key = %key,
                    status = response.status,
                    "ticket rejected: {message}"
                );
                Err(SupportError::Rejected {
                    status: response.status,
                    message,
                })
            }
        }
    }

    /// Full submit cycle against a form: gate, send, record the outcome
    pub async fn submit(&self, form: &mut TicketForm) -> Result<SubmissionReceipt> {
        let pending = form.begin_submit()?;
        let outcome = self.deliver(pending).await;
        form.finish(outcome)
    }
}
