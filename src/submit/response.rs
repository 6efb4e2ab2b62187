//! Interpretation of endpoint responses.

use serde_json::{Value, json};

use super::SuccessContract;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// An endpoint answer, reduced to the parts that matter for interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// Convenience for a JSON answer
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, Some("application/json"), body.to_string())
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn declares_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"))
    }

    /// The body as JSON.
    ///
    /// Non-JSON bodies, and JSON bodies that fail to parse, are wrapped as
    /// `{"message": <raw text>}`.
    pub fn parsed_body(&self) -> Value {
        if self.declares_json()
            && let Ok(value) = serde_json::from_str::<Value>(&self.body)
        {
            return value;
        }
        json!({ "message": self.body })
    }
}

/// Outcome of a submission as judged by the success contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted { message: Option<String> },
    Rejected { message: String },
}

/// Best-effort human message from a parsed body
fn body_message(body: &Value) -> Option<String> {
    let text = match body {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
        _ => None,
    }?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Decide whether the endpoint accepted the ticket
pub fn interpret(response: &RawResponse, contract: SuccessContract) -> Verdict {
    let body = response.parsed_body();
    let message = body_message(&body);

    let accepted = response.is_success_status()
        && match contract {
            SuccessContract::Status => true,
            SuccessContract::OkFlag => body.get("ok").and_then(Value::as_bool) == Some(true),
        };

    if accepted {
        return Verdict::Accepted { message };
    }

    let message = message.unwrap_or_else(|| {
        if response.is_success_status() {
            GENERIC_FAILURE.to_string()
        } else {
            format!("HTTP {}", response.status)
        }
    });
    Verdict::Rejected { message }
}
