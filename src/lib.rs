#[macro_use]
mod macros;

pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod submit;
pub mod ticket;
pub mod tui;
pub mod types;

pub use config::Config;
pub use error::{Result, SupportError};
pub use form::{PendingSubmission, SubmissionStatus, TicketForm};
pub use submit::{
    HttpTransport, RawResponse, SubmissionReceipt, SubmitTransport, Submitter, SuccessContract,
    Verdict, interpret,
};
pub use ticket::{
    Attachment, AttachmentPolicy, Field, FieldError, FieldUpdate, OrderReference,
    TicketSubmission, WirePayload, validate,
};
pub use types::{ContactMethod, IssueType, SubReason};
