//! Theme system for TUI colors and styles
//!
//! Defines color constants consistent with the CLI output (commands/).

use iocraft::prelude::Color;

use crate::form::SubmissionStatus;

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Submission state colors
    pub status_idle: Color,
    pub status_submitting: Color,
    pub status_succeeded: Color,
    pub status_failed: Color,

    // Field colors
    pub required_marker: Color,
    pub order_prefix: Color,
    pub field_error: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_idle: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            status_submitting: Color::Yellow,
            status_succeeded: Color::Green,
            status_failed: Color::Red,

            required_marker: Color::Red,
            order_prefix: Color::Cyan,
            field_error: Color::Red,

            border: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            highlight: Color::Blue,
        }
    }
}

impl Theme {
    /// Get the color for a submission status
    pub fn status_color(&self, status: &SubmissionStatus) -> Color {
        match status {
            SubmissionStatus::Idle => self.status_idle,
            SubmissionStatus::Submitting => self.status_submitting,
            SubmissionStatus::Succeeded => self.status_succeeded,
            SubmissionStatus::Failed(_) => self.status_failed,
        }
    }

    /// Border color for a field, by focus
    pub fn field_border(&self, focused: bool) -> Color {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }

    /// Label color for a field, by focus
    pub fn field_label(&self, focused: bool) -> Color {
        if focused {
            self.border_focused
        } else {
            self.text_dimmed
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
