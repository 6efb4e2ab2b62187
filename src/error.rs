use thiserror::Error;

use crate::ticket::FieldError;

#[derive(Error, Debug)]
pub enum SupportError {
    #[error("{0}")]
    Validation(FieldError),

    #[error("invalid issue type '{0}'")]
    InvalidIssueType(String),

    #[error("unknown sub-reason '{0}'")]
    UnknownSubReason(String),

    #[error("'{reason}' is not a valid sub-reason for {issue_type}")]
    InvalidSubReason { issue_type: String, reason: String },

    #[error("invalid contact method '{0}', expected 'email' or 'phone'")]
    InvalidContactMethod(String),

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Error submitting form: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<FieldError> for SupportError {
    fn from(error: FieldError) -> Self {
        SupportError::Validation(error)
    }
}

pub type Result<T> = std::result::Result<T, SupportError>;
