//! Delivery of tickets to the support endpoint.
//!
//! The endpoint is an opaque collaborator (an Apps Script web app or a REST
//! API). Everything it returns goes through [`response::interpret`] under one
//! explicit [`SuccessContract`], so there is exactly one place that decides
//! whether a ticket was accepted.

pub mod http;
pub mod response;
pub mod service;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SupportError};
use crate::ticket::WirePayload;

pub use http::HttpTransport;
pub use response::{RawResponse, Verdict, interpret};
pub use service::Submitter;

/// How a response is judged to be a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessContract {
    /// Any 2xx status
    #[default]
    Status,
    /// A 2xx status whose body carries `"ok": true`
    OkFlag,
}

impl fmt::Display for SuccessContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuccessContract::Status => write!(f, "status"),
            SuccessContract::OkFlag => write!(f, "ok_flag"),
        }
    }
}

impl FromStr for SuccessContract {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "status" => Ok(SuccessContract::Status),
            "ok_flag" => Ok(SuccessContract::OkFlag),
            _ => Err(SupportError::Config(format!(
                "unknown success contract '{s}', expected 'status' or 'ok_flag'"
            ))),
        }
    }
}

/// What a successful submission leaves behind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub idempotency_key: Uuid,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Common interface for anything that can carry a ticket to the endpoint
pub trait SubmitTransport: Send + Sync {
    /// POST the payload once and hand back whatever the endpoint answered.
    ///
    /// Only transport-level failures are errors here; a 4xx/5xx answer is a
    /// normal `RawResponse`.
    fn send(
        &self,
        payload: WirePayload,
        idempotency_key: Uuid,
    ) -> impl std::future::Future<Output = Result<RawResponse>> + Send;
}
