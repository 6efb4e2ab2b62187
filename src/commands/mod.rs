mod config;
mod form;
mod issue_types;
mod submit;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use form::cmd_form;
pub use issue_types::cmd_issue_types;
pub use submit::{SUCCESS_MESSAGE, SubmitOptions, cmd_submit};

use serde_json::Value;

use crate::error::Result;

/// Output mode shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

/// A command result that can be rendered as JSON or as human text
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print in the requested mode. Falls back to pretty JSON when no text was given.
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match (output.json, self.text) {
            (false, Some(text)) => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}
