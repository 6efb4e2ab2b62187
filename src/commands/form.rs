//! Interactive ticket form (`supportdesk form`)

use iocraft::prelude::*;

use crate::config::Config;
use crate::error::{Result, SupportError};
use crate::tui::SupportForm;

/// Launch the full-screen ticket form
pub async fn cmd_form(endpoint: Option<String>) -> Result<()> {
    let config = Config::load()?;

    element!(SupportForm(config: config, endpoint: endpoint))
        .fullscreen()
        .await
        .map_err(|e| SupportError::Other(format!("TUI error: {}", e)))
}
