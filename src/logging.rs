//! Tracing subscriber setup.
//!
//! `SUPPORTDESK_LOG` takes an `EnvFilter` directive (e.g. `debug` or
//! `supportdesk=trace`). Line-mode commands log to stderr; the fullscreen form
//! logs to `.supportdesk/supportdesk.log` and only when the variable is set.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::support_root;

pub const LOG_ENV: &str = "SUPPORTDESK_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The terminal belongs to the form; write to a file under the support dir
    File,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(target: LogTarget) {
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
        LogTarget::File => {
            if std::env::var_os(LOG_ENV).is_none() {
                return;
            }
            let root = support_root();
            if std::fs::create_dir_all(&root).is_err() {
                return;
            }
            let Ok(file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(root.join("supportdesk.log"))
            else {
                return;
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
    }
}
