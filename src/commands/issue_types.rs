use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions};
use crate::error::Result;
use crate::types::IssueType;

/// List issue types with their sub-reasons
pub fn cmd_issue_types(output: OutputOptions) -> Result<()> {
    let json_output: Vec<_> = IssueType::ALL
        .iter()
        .map(|issue| {
            json!({
                "slug": issue.slug(),
                "label": issue.label(),
                "order_reference_required": issue.requires_order_reference(),
                "sub_reasons": issue
                    .sub_reasons()
                    .iter()
                    .map(|r| json!({ "slug": r.slug(), "label": r.label() }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let mut text_output = String::new();
    for issue in IssueType::ALL {
        text_output.push_str(&format!("{:16} {}", issue.slug().cyan(), issue.label()));
        if !issue.requires_order_reference() {
            text_output.push_str(&format!(" {}", "(no order ID)".dimmed()));
        }
        text_output.push('\n');
        for reason in issue.sub_reasons() {
            text_output.push_str(&format!(
                "  - {:18} {}\n",
                reason.slug().dimmed(),
                reason.label()
            ));
        }
    }

    CommandOutput::new(json!(json_output))
        .with_text(text_output.trim_end())
        .print(output)
}
