//! Shared TUI components for the ticket form

pub mod footer;
pub mod select;
pub mod shortcuts;
pub mod text_field;
pub mod toast;

pub use footer::{Footer, FooterProps, Shortcut, form_shortcuts, submitting_shortcuts};
pub use select::{Select, SelectProps, cycle};
pub use text_field::{TextField, TextFieldProps};
pub use toast::{Toast, ToastLevel, render_toast};
